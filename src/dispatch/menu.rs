//! Embedded sites menu.
//!
//! Entries are loaded once at startup and never change afterwards. Each
//! entry points either at an external URL or at a document hosted by the
//! content server, in which case the link carries the caller's id.

use serde::{Deserialize, Serialize};

use super::texts;
use crate::session::CallerId;
use crate::transport::{InlineButton, Keyboard};

/// Buttons per keyboard row.
const ROW_WIDTH: usize = 2;

/// Where a menu entry leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    /// Fixed external URL.
    Url(String),
    /// Document under `/uploads` on the public base URL.
    Document(String),
}

/// One selectable entry of the sites menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Selection id carried by the button.
    pub id: String,
    /// Button label.
    pub label: String,
    /// First line of the reply, above the link.
    pub title: String,
    pub target: LinkTarget,
}

impl MenuEntry {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        title: impl Into<String>,
        target: LinkTarget,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            title: title.into(),
            target,
        }
    }
}

/// Entries used when the configuration does not list any.
pub fn default_entries() -> Vec<MenuEntry> {
    vec![
        MenuEntry::new(
            "site_ai",
            "ذكاء اصطناعيّ",
            "🤖 موقع الذكاء الاصطناعي:",
            LinkTarget::Url("https://nikai.pages.dev/".into()),
        ),
        MenuEntry::new(
            "site_quran",
            "قرآن كريم",
            "📖 موقع القرآن الكريم:",
            LinkTarget::Url("https://quran7.pages.dev/".into()),
        ),
        MenuEntry::new(
            "site_translate",
            "ترجمة لغات",
            "🌍 موقع الترجمة متعددة اللغات:",
            LinkTarget::Url("https://transla.pages.dev/".into()),
        ),
        MenuEntry::new(
            "site_tele",
            "اندكس تلجرام",
            "📊 اندكس تلجرام:",
            LinkTarget::Document("tele.html".into()),
        ),
        MenuEntry::new(
            "site_insta_index",
            "اندكس انستا",
            "📸 اندكس انستجرام:",
            LinkTarget::Document("insat.html".into()),
        ),
    ]
}

/// A resolved menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuLink {
    pub title: String,
    pub url: String,
}

impl MenuLink {
    /// Reply text: title line followed by the URL.
    pub fn reply(&self) -> String {
        format!("{}\n{}", self.title, self.url)
    }
}

/// Renders the sites menu and resolves selections to links.
#[derive(Debug, Clone)]
pub struct MenuPresenter {
    base_url: String,
    entries: Vec<MenuEntry>,
}

impl MenuPresenter {
    pub fn new(base_url: impl Into<String>, entries: Vec<MenuEntry>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Header text and inline keyboard for the menu.
    pub fn present(&self) -> (&'static str, Keyboard) {
        let rows = self
            .entries
            .chunks(ROW_WIDTH)
            .map(|row| {
                row.iter()
                    .map(|e| InlineButton::new(&e.label, &e.id))
                    .collect()
            })
            .collect();
        (texts::SITES_HEADER, Keyboard::Inline(rows))
    }

    /// Resolve a selection id for the caller.
    pub fn resolve(&self, selection_id: &str, caller: CallerId) -> Option<MenuLink> {
        let entry = self.entries.iter().find(|e| e.id == selection_id)?;
        let url = match &entry.target {
            LinkTarget::Url(url) => url.clone(),
            LinkTarget::Document(document) => {
                format!("{}/uploads/{}?user={}", self.base_url, document, caller)
            }
        };
        Some(MenuLink {
            title: entry.title.clone(),
            url,
        })
    }

    /// Reply text for a selection; unknown ids get the unavailable text.
    pub fn reply_for(&self, selection_id: &str, caller: CallerId) -> String {
        self.resolve(selection_id, caller)
            .map(|link| link.reply())
            .unwrap_or_else(|| texts::SITE_UNAVAILABLE.to_string())
    }
}
