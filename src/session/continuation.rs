//! Pending follow-up actions.

use std::fmt;
use std::time::{Duration, Instant};

/// An action that needs one free-form follow-up message from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Turn a text prompt into an image.
    GenerateImage,
    /// Answer a free-form question.
    AskAi,
    /// Translate text over the configured language pair.
    Translate,
    /// Forward a message to the operator chat.
    ContactDeveloper,
}

impl Action {
    /// All actions, in menu order.
    pub const ALL: [Action; 4] = [
        Action::GenerateImage,
        Action::AskAi,
        Action::Translate,
        Action::ContactDeveloper,
    ];

    /// Whether resolving this action issues an outbound HTTP call.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Action::ContactDeveloper)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::GenerateImage => "generate_image",
            Action::AskAi => "ask_ai",
            Action::Translate => "translate",
            Action::ContactDeveloper => "contact_developer",
        };
        f.write_str(name)
    }
}

/// A continuation armed for a session, waiting for the next message.
#[derive(Debug, Clone, Copy)]
pub struct PendingContinuation {
    /// Action the next qualifying message will be fed into.
    pub action: Action,
    /// Time the continuation was armed. Not used for expiry.
    pub armed_at: Instant,
}

impl PendingContinuation {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            armed_at: Instant::now(),
        }
    }

    /// Time elapsed since the continuation was armed.
    pub fn age(&self) -> Duration {
        self.armed_at.elapsed()
    }
}
