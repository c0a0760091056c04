//! HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::error;

use crate::content::ContentStore;
use crate::error::RelayError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentStore>,
}

impl AppState {
    pub fn new(content: ContentStore) -> Self {
        Self {
            content: Arc::new(content),
        }
    }
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// Serve a document with the caller id substituted.
pub async fn serve_document(
    State(state): State<AppState>,
    Path((name, user_id)): Path<(String, String)>,
) -> Response {
    match state.content.serve(&name, &user_id).await {
        Ok(document) => Html(document.body).into_response(),
        Err(RelayError::ContentNotFound(_)) => {
            (StatusCode::NOT_FOUND, "File not found").into_response()
        }
        Err(e) => {
            error!(document = %name, error = %e, "failed to serve document");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(health().await, "OK");
    }

    #[tokio::test]
    async fn test_unknown_document_is_404() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(ContentStore::open(dir.path()).await.unwrap());

        let response = serve_document(
            State(state),
            Path(("nope.html".to_string(), "42".to_string())),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
