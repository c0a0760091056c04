//! Fixed command table.

use crate::session::Action;
use crate::transport::Keyboard;

/// Prefix reserved for slash commands.
pub const COMMAND_PREFIX: char = '/';

/// Slash command that shows the welcome message.
pub const START_COMMAND: &str = "/start";

pub const LABEL_GENERATE_IMAGE: &str = "انشاء صور 🖼️";
pub const LABEL_ASK_AI: &str = "ذكاء اصطناعيّ 🤖";
pub const LABEL_TRANSLATE: &str = "ترجمه نص 🌐";
pub const LABEL_CONTACT: &str = "تواصل مع المطور 📩";
pub const LABEL_SITES: &str = "المواقع المدمجة 🌍";

/// A recognised inbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start`: welcome text with the main keyboard.
    Start,
    /// Prompt for input and arm a continuation.
    Prompt(Action),
    /// Show the embedded sites menu.
    Sites,
}

impl Command {
    /// Match message text against the command table.
    ///
    /// Keyboard labels match by exact equality only. `/start` also accepts
    /// a bot mention or a payload after it.
    pub fn parse(text: &str) -> Option<Command> {
        let command = match text {
            LABEL_GENERATE_IMAGE => Command::Prompt(Action::GenerateImage),
            LABEL_ASK_AI => Command::Prompt(Action::AskAi),
            LABEL_TRANSLATE => Command::Prompt(Action::Translate),
            LABEL_CONTACT => Command::Prompt(Action::ContactDeveloper),
            LABEL_SITES => Command::Sites,
            _ if is_start(text) => Command::Start,
            _ => return None,
        };
        Some(command)
    }
}

fn is_start(text: &str) -> bool {
    text.strip_prefix(START_COMMAND)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '@']))
}

/// Whether the text is a command rather than a free-form answer.
///
/// Slash commands and keyboard labels never resolve a pending
/// continuation.
pub fn is_command(text: &str) -> bool {
    text.starts_with(COMMAND_PREFIX) || Command::parse(text).is_some()
}

/// Label of the keyboard button that arms the action.
pub fn label(action: Action) -> &'static str {
    match action {
        Action::GenerateImage => LABEL_GENERATE_IMAGE,
        Action::AskAi => LABEL_ASK_AI,
        Action::Translate => LABEL_TRANSLATE,
        Action::ContactDeveloper => LABEL_CONTACT,
    }
}

/// Persistent main keyboard, laid out 2/2/1.
pub fn main_keyboard() -> Keyboard {
    let rows = [
        &[LABEL_GENERATE_IMAGE, LABEL_ASK_AI][..],
        &[LABEL_TRANSLATE, LABEL_CONTACT][..],
        &[LABEL_SITES][..],
    ];
    Keyboard::Reply(
        rows.iter()
            .map(|row| row.iter().map(|l| l.to_string()).collect())
            .collect(),
    )
}
