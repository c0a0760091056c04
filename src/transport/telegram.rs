//! Telegram Bot API transport.
//!
//! Updates are consumed through the teloxide dispatcher, which handles
//! updates of one chat in order and different chats concurrently. A slow
//! outbound call therefore only delays the chat that triggered it.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    dptree,
    error_handlers::LoggingErrorHandler,
    payloads::{SendMessageSetters, SendPhotoSetters},
    prelude::*,
    types::{
        BotCommand, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, KeyboardButton,
        KeyboardMarkup, MessageId, ParseMode, Update,
    },
};
use tracing::{debug, info, warn};

use super::{
    InboundMessage, InlineButton, Keyboard, MessageRef, SelectionEvent, Transport,
};
use crate::dispatch::CommandDispatcher;
use crate::error::RelayError;
use crate::session::{CallerId, SessionId};
use crate::Result;

/// [`Transport`] backed by a teloxide [`Bot`].
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

fn chat(session: SessionId) -> ChatId {
    ChatId(session.as_i64())
}

fn reply_markup(rows: &[Vec<String>]) -> KeyboardMarkup {
    let rows = rows
        .iter()
        .map(|row| row.iter().map(KeyboardButton::new).collect::<Vec<_>>());
    KeyboardMarkup::new(rows).resize_keyboard()
}

fn inline_markup(rows: &[Vec<InlineButton>]) -> InlineKeyboardMarkup {
    let rows = rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(&self, session: SessionId, text: &str) -> Result<MessageRef> {
        let sent = self.bot.send_message(chat(session), text).await?;
        Ok(MessageRef::new(sent.id.0))
    }

    async fn send_markup(
        &self,
        session: SessionId,
        html: &str,
        keyboard: &Keyboard,
    ) -> Result<MessageRef> {
        let request = self
            .bot
            .send_message(chat(session), html)
            .parse_mode(ParseMode::Html);

        let sent = match keyboard {
            Keyboard::Reply(rows) => request.reply_markup(reply_markup(rows)).await?,
            Keyboard::Inline(rows) => request.reply_markup(inline_markup(rows)).await?,
        };
        Ok(MessageRef::new(sent.id.0))
    }

    async fn send_photo(
        &self,
        session: SessionId,
        url: &str,
        caption: &str,
    ) -> Result<MessageRef> {
        let parsed = url
            .parse::<reqwest::Url>()
            .map_err(|e| RelayError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let sent = self
            .bot
            .send_photo(chat(session), InputFile::url(parsed))
            .caption(caption)
            .await?;
        Ok(MessageRef::new(sent.id.0))
    }

    async fn delete_message(&self, session: SessionId, message: MessageRef) -> Result<()> {
        self.bot
            .delete_message(chat(session), MessageId(message.id()))
            .await?;
        Ok(())
    }

    async fn answer_selection(&self, selection_id: &str) -> Result<()> {
        self.bot.answer_callback_query(selection_id).await?;
        Ok(())
    }
}

/// Convert a Telegram message into an [`InboundMessage`].
///
/// Messages without a sender (channel posts) are skipped.
pub fn inbound_message(msg: &Message) -> Option<InboundMessage> {
    let sender = msg.from.as_ref()?;
    Some(InboundMessage {
        session: SessionId::from_raw(msg.chat.id.0),
        caller: CallerId::from_raw(sender.id.0),
        text: msg.text().map(str::to_string),
    })
}

/// Convert a callback query into a [`SelectionEvent`].
pub fn selection_event(query: &CallbackQuery) -> SelectionEvent {
    SelectionEvent {
        id: query.id.clone(),
        session: query
            .message
            .as_ref()
            .map(|m| SessionId::from_raw(m.chat().id.0)),
        caller: CallerId::from_raw(query.from.id.0),
        data: query.data.clone(),
    }
}

async fn on_message(msg: Message, dispatcher: Arc<CommandDispatcher>) -> ResponseResult<()> {
    match inbound_message(&msg) {
        Some(inbound) => dispatcher.handle_message(inbound).await,
        None => debug!(chat_id = msg.chat.id.0, "ignoring message without sender"),
    }
    Ok(())
}

async fn on_selection(
    query: CallbackQuery,
    dispatcher: Arc<CommandDispatcher>,
) -> ResponseResult<()> {
    dispatcher.handle_selection(selection_event(&query)).await;
    Ok(())
}

/// Register the bot's slash commands with Telegram clients.
pub async fn register_commands(bot: &Bot) {
    let commands = vec![BotCommand::new("start", "Show the main menu")];
    if let Err(e) = bot.set_my_commands(commands).await {
        warn!(error = %e, "failed to register bot commands");
    }
}

/// Run the long-polling update loop until Ctrl-C.
pub async fn run(bot: Bot, dispatcher: Arc<CommandDispatcher>) {
    register_commands(&bot).await;

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_selection));

    info!("starting telegram dispatcher with long polling");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .default_handler(|update| async move {
            debug!(update = ?update.kind, "ignoring unsupported update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "error in telegram update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("telegram dispatcher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_markup_layout() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string()],
        ];
        let markup = reply_markup(&rows);
        assert_eq!(markup.keyboard.len(), 2);
        assert_eq!(markup.keyboard[0].len(), 2);
        assert_eq!(markup.keyboard[1][0].text, "c");
    }

    #[test]
    fn test_inline_markup_layout() {
        let rows = vec![vec![
            InlineButton::new("AI", "site_ai"),
            InlineButton::new("Index", "site_tele"),
        ]];
        let markup = inline_markup(&rows);
        assert_eq!(markup.inline_keyboard.len(), 1);
        assert_eq!(markup.inline_keyboard[0][1].text, "Index");
    }

    #[test]
    fn test_chat_id_mapping() {
        assert_eq!(chat(SessionId::from_raw(-100)), ChatId(-100));
    }
}
