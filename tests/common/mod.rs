//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use relay_bot::dispatch::menu;
use relay_bot::services::{self, ServiceHub};
use relay_bot::session::{CallerId, SessionId};
use relay_bot::transport::{InboundMessage, Keyboard, MessageRef, SelectionEvent, Transport};
use relay_bot::{CommandDispatcher, ContinuationRegistry, MenuPresenter, RelayError};

pub const BASE_URL: &str = "https://relay.example.com";

/// Something the dispatcher asked the transport to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(SessionId, String),
    Markup(SessionId, String, Keyboard),
    Photo(SessionId, String, String),
    Deleted(SessionId, MessageRef),
    Answered(String),
}

/// Transport that records every call instead of talking to a platform.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    next_id: AtomicI32,
    fail_photos: bool,
    fail_texts_containing: Option<String>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Transport whose photo sends fail.
    pub fn failing_photos() -> Arc<Self> {
        Arc::new(Self {
            fail_photos: true,
            ..Self::default()
        })
    }

    /// Transport whose text sends fail when the text contains `needle`.
    pub fn failing_texts_containing(needle: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_texts_containing: Some(needle.to_string()),
            ..Self::default()
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts sent to the chat, in order.
    pub fn texts(&self, session: SessionId) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(to, text) if to == session => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_text(&self, session: SessionId) -> Option<String> {
        self.texts(session).pop()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    fn record(&self, sent: Sent) -> MessageRef {
        self.sent.lock().unwrap().push(sent);
        MessageRef::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, session: SessionId, text: &str) -> relay_bot::Result<MessageRef> {
        if let Some(needle) = &self.fail_texts_containing {
            if text.contains(needle.as_str()) {
                return Err(RelayError::Io(std::io::Error::other("chat unreachable")));
            }
        }
        Ok(self.record(Sent::Text(session, text.to_string())))
    }

    async fn send_markup(
        &self,
        session: SessionId,
        html: &str,
        keyboard: &Keyboard,
    ) -> relay_bot::Result<MessageRef> {
        Ok(self.record(Sent::Markup(session, html.to_string(), keyboard.clone())))
    }

    async fn send_photo(
        &self,
        session: SessionId,
        url: &str,
        caption: &str,
    ) -> relay_bot::Result<MessageRef> {
        if self.fail_photos {
            return Err(RelayError::InvalidUrl {
                url: url.to_string(),
                reason: "rejected by test transport".to_string(),
            });
        }
        Ok(self.record(Sent::Photo(session, url.to_string(), caption.to_string())))
    }

    async fn delete_message(&self, session: SessionId, message: MessageRef) -> relay_bot::Result<()> {
        self.record(Sent::Deleted(session, message));
        Ok(())
    }

    async fn answer_selection(&self, selection_id: &str) -> relay_bot::Result<()> {
        self.record(Sent::Answered(selection_id.to_string()));
        Ok(())
    }
}

/// Service endpoints for a dispatcher under test.
pub struct Endpoints {
    pub image: String,
    pub qa: String,
    pub translate: String,
}

impl Endpoints {
    /// Endpoints under one mock server.
    pub fn under(base: &str) -> Self {
        Self {
            image: format!("{base}/art"),
            qa: format!("{base}/qa"),
            translate: format!("{base}/translate"),
        }
    }
}

/// Build a dispatcher wired to real adapters and a recording transport.
pub fn dispatcher(
    transport: Arc<RecordingTransport>,
    endpoints: Endpoints,
    operator: Option<SessionId>,
) -> CommandDispatcher {
    let mut section = relay_bot::config::ServicesSection::default();
    section.image_url = endpoints.image;
    section.qa_url = endpoints.qa;
    section.translate_url = endpoints.translate;

    let client = services::http_client(None).unwrap();
    let transport: Arc<dyn Transport> = transport;
    let hub = ServiceHub::from_config(&section, client, transport.clone(), operator);

    CommandDispatcher::new(
        transport,
        Arc::new(ContinuationRegistry::new()),
        hub,
        MenuPresenter::new(BASE_URL, menu::default_entries()),
        "@QR_l4",
    )
}

pub fn text(session: SessionId, caller: CallerId, text: &str) -> InboundMessage {
    InboundMessage {
        session,
        caller,
        text: Some(text.to_string()),
    }
}

pub fn selection(session: SessionId, caller: CallerId, data: &str) -> SelectionEvent {
    SelectionEvent {
        id: format!("cb-{data}"),
        session: Some(session),
        caller,
        data: Some(data.to_string()),
    }
}
