//! # relay-bot
//!
//! Telegram bot gateway relaying chat commands to remote services.
//!
//! Users pick an action from a reply keyboard; the bot asks for input,
//! remembers the pending action for that chat, and relays the next text
//! to the matching service.
//!
//! ## Features
//!
//! - **Command dispatch**: Keyboard labels and `/start` routed per chat
//! - **One-shot continuations**: The next free text resolves the last prompt
//! - **Outbound services**: Image generation, Q&A, en→ar translation, developer contact
//! - **Sites menu**: Inline keyboard of external and hosted links
//! - **Content server**: Hosted documents with the caller id substituted
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use relay_bot::session::{Action, SessionId};
//! use relay_bot::ContinuationRegistry;
//!
//! fn main() -> relay_bot::Result<()> {
//!     let registry = Arc::new(ContinuationRegistry::new());
//!     let chat = SessionId::from_raw(42);
//!
//!     registry.arm(chat, Action::Translate)?;
//!     assert!(registry.pending(chat)?.is_some());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod services;
pub mod session;
pub mod transport;

// Re-export commonly used types
pub use content::ContentStore;
pub use dispatch::{CommandDispatcher, MenuPresenter, Outcome};
pub use error::{RelayError, Result};
pub use services::{OutboundResult, OutboundService, Payload, ServiceError, ServiceHub};
pub use session::{Action, CallerId, ContinuationRegistry, SessionId};
pub use transport::{InboundMessage, Keyboard, SelectionEvent, Transport};
