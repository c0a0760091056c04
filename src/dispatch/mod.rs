//! Inbound routing.
//!
//! This module maps chat messages to actions by exact label match, arms
//! and resolves one-shot continuations, and serves the sites menu.
//!
//! ## Flow
//!
//! 1. A message that is not a command resolves the session's pending
//!    continuation, if there is one.
//! 2. Otherwise the text is matched against the fixed command table:
//!    `/start` shows the welcome keyboard, the sites label shows the menu,
//!    and the remaining labels prompt for input and arm a continuation.
//! 3. Anything else is ignored.

pub mod commands;
pub mod dispatcher;
pub mod menu;
pub mod texts;

pub use commands::Command;
pub use dispatcher::{CommandDispatcher, Outcome};
pub use menu::{LinkTarget, MenuEntry, MenuLink, MenuPresenter};
