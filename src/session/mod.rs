//! Session management module.
//!
//! This module provides session identification and the registry of
//! one-shot continuations that capture a caller's next message.

mod continuation;
mod id;
mod registry;

pub use continuation::{Action, PendingContinuation};
pub use id::{CallerId, SessionId};
pub use registry::{ContinuationRegistry, Resolution};
