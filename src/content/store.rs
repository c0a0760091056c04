//! Document catalogue and placeholder substitution.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::RelayError;
use crate::Result;

/// Token replaced with the caller id when a document is served.
pub const PLACEHOLDER: &str = "USER_ID_PLACEHOLDER";

/// A served document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub body: String,
}

/// Replace every placeholder in `document` with `caller_id`.
///
/// Plain substitution without escaping: caller ids are expected to be
/// opaque numeric identifiers.
pub fn substitute(document: &str, caller_id: &str) -> String {
    document.replace(PLACEHOLDER, caller_id)
}

/// Fixed set of named documents under one directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    documents: BTreeSet<String>,
}

impl ContentStore {
    /// Catalogue the regular files directly under `root`.
    ///
    /// A missing directory yields an empty store.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let mut documents = BTreeSet::new();

        let mut entries = match tokio::fs::read_dir(&root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(root = %root.display(), "content directory not found, serving nothing");
                return Ok(Self { root, documents });
            }
            Err(e) => return Err(RelayError::Io(e)),
        };

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => {
                    documents.insert(name);
                }
                Err(name) => debug!(?name, "skipping non UTF-8 file name"),
            }
        }

        info!(
            root = %root.display(),
            count = documents.len(),
            "content store catalogued"
        );
        Ok(Self { root, documents })
    }

    /// Directory the documents are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `name` is a catalogued document.
    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains(name)
    }

    /// Catalogued document names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(String::as_str)
    }

    /// Load `name` and substitute the caller id.
    ///
    /// Unknown names and unreadable files both yield
    /// [`RelayError::ContentNotFound`].
    pub async fn serve(&self, name: &str, caller_id: &str) -> Result<Document> {
        if !self.contains(name) {
            return Err(RelayError::ContentNotFound(name.to_string()));
        }

        let body = tokio::fs::read_to_string(self.root.join(name))
            .await
            .map_err(|e| {
                warn!(document = name, error = %e, "failed to read document");
                RelayError::ContentNotFound(name.to_string())
            })?;

        Ok(Document {
            name: name.to_string(),
            body: substitute(&body, caller_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) {
        std::fs::write(dir.path().join(name), body).unwrap();
    }

    #[test]
    fn test_substitute_all_occurrences() {
        let doc = "<a href=\"?u=USER_ID_PLACEHOLDER\">USER_ID_PLACEHOLDER</a>";
        let out = substitute(doc, "42");
        assert_eq!(out.matches(PLACEHOLDER).count(), 0);
        assert_eq!(out.matches("42").count(), 2);
    }

    #[test]
    fn test_substitute_without_placeholder() {
        assert_eq!(substitute("<p>static</p>", "42"), "<p>static</p>");
    }

    #[tokio::test]
    async fn test_serve_known_document() {
        let dir = TempDir::new().unwrap();
        write(&dir, "tele.html", "id=USER_ID_PLACEHOLDER;again=USER_ID_PLACEHOLDER");

        let store = ContentStore::open(dir.path()).await.unwrap();
        let doc = store.serve("tele.html", "42").await.unwrap();

        assert_eq!(doc.name, "tele.html");
        assert_eq!(doc.body, "id=42;again=42");
    }

    #[tokio::test]
    async fn test_unknown_document_not_found() {
        let dir = TempDir::new().unwrap();
        write(&dir, "tele.html", "x");

        let store = ContentStore::open(dir.path()).await.unwrap();
        let err = store.serve("missing.html", "42").await.unwrap_err();
        assert!(matches!(err, RelayError::ContentNotFound(name) if name == "missing.html"));
    }

    #[tokio::test]
    async fn test_traversal_not_catalogued() {
        let dir = TempDir::new().unwrap();
        let inner = dir.path().join("uploads");
        std::fs::create_dir(&inner).unwrap();
        write(&dir, "secret.txt", "secret");
        std::fs::write(inner.join("page.html"), "page").unwrap();

        let store = ContentStore::open(&inner).await.unwrap();
        assert!(store.contains("page.html"));
        assert!(!store.contains("../secret.txt"));
        assert!(store.serve("../secret.txt", "1").await.is_err());
    }

    #[tokio::test]
    async fn test_subdirectories_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        write(&dir, "a.html", "a");
        write(&dir, "b.html", "b");

        let store = ContentStore::open(dir.path()).await.unwrap();
        let names: Vec<_> = store.names().collect();
        assert_eq!(names, vec!["a.html", "b.html"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = ContentStore::open(dir.path().join("absent")).await.unwrap();
        assert_eq!(store.names().count(), 0);
    }

    #[tokio::test]
    async fn test_deleted_after_catalogue_not_found() {
        let dir = TempDir::new().unwrap();
        write(&dir, "gone.html", "x");
        let store = ContentStore::open(dir.path()).await.unwrap();

        std::fs::remove_file(dir.path().join("gone.html")).unwrap();
        let err = store.serve("gone.html", "1").await.unwrap_err();
        assert!(matches!(err, RelayError::ContentNotFound(_)));
    }
}
