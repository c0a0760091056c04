//! Messaging transport seam.
//!
//! The dispatcher only needs a handful of operations from the chat
//! platform: send text, send a photo by URL, send a message with a
//! keyboard, delete a message and acknowledge a button press. They are
//! collected in [`Transport`]; [`telegram`] provides the Bot API
//! implementation and the update loop feeding the dispatcher.

pub mod telegram;

use async_trait::async_trait;

use crate::session::{CallerId, SessionId};
use crate::Result;

pub use telegram::TelegramTransport;

/// Reference to a message sent through the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef(i32);

impl MessageRef {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> i32 {
        self.0
    }
}

/// A button that sends a selection event instead of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    /// Text shown on the button.
    pub label: String,
    /// Selection id delivered when pressed.
    pub data: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Keyboard attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Persistent reply keyboard; pressing a button sends its label as text.
    Reply(Vec<Vec<String>>),
    /// Buttons under the message that raise selection events.
    Inline(Vec<Vec<InlineButton>>),
}

/// A message received from a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub session: SessionId,
    pub caller: CallerId,
    /// Message text; `None` for photos, stickers and other non-text content.
    pub text: Option<String>,
}

/// A button press on an inline keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    /// Transport id used to acknowledge the press.
    pub id: String,
    /// Chat the keyboard was shown in, when the platform still knows it.
    pub session: Option<SessionId>,
    pub caller: CallerId,
    /// Selection id carried by the button.
    pub data: Option<String>,
}

/// Outbound side of the chat platform.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send plain text.
    async fn send_text(&self, session: SessionId, text: &str) -> Result<MessageRef>;

    /// Send HTML-formatted text with a keyboard.
    async fn send_markup(
        &self,
        session: SessionId,
        html: &str,
        keyboard: &Keyboard,
    ) -> Result<MessageRef>;

    /// Send a photo by URL with a caption.
    async fn send_photo(&self, session: SessionId, url: &str, caption: &str)
        -> Result<MessageRef>;

    /// Delete a previously sent message.
    async fn delete_message(&self, session: SessionId, message: MessageRef) -> Result<()>;

    /// Acknowledge a selection event so the client stops waiting.
    async fn answer_selection(&self, selection_id: &str) -> Result<()>;
}
