//! Command dispatcher.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::commands::{self, Command};
use super::menu::MenuPresenter;
use super::texts;
use crate::services::{OutboundResult, Payload, ServiceError, ServiceHub};
use crate::session::{Action, ContinuationRegistry, Resolution, SessionId};
use crate::transport::{InboundMessage, SelectionEvent, Transport};
use crate::Result;

/// What the dispatcher did with an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Sent the welcome text and main keyboard.
    Welcome,
    /// Sent the sites menu.
    Menu,
    /// Prompted for input and armed a continuation.
    Prompted(Action),
    /// Fed the message to a pending continuation.
    Resolved(Action),
    /// Nothing matched.
    Ignored,
}

/// Routes inbound messages and menu selections.
///
/// A pending continuation takes precedence over the command table for any
/// text that is not itself a command.
pub struct CommandDispatcher {
    transport: Arc<dyn Transport>,
    registry: Arc<ContinuationRegistry>,
    services: ServiceHub,
    menu: MenuPresenter,
    developer_username: String,
}

impl CommandDispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        registry: Arc<ContinuationRegistry>,
        services: ServiceHub,
        menu: MenuPresenter,
        developer_username: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            registry,
            services,
            menu,
            developer_username: developer_username.into(),
        }
    }

    pub fn registry(&self) -> &Arc<ContinuationRegistry> {
        &self.registry
    }

    /// Handle one inbound message.
    ///
    /// Errors are logged and answered with a generic failure text; they
    /// never reach the transport loop.
    pub async fn handle_message(&self, message: InboundMessage) {
        if let Err(e) = self.dispatch(&message).await {
            error!(session = %message.session, error = %e, "failed to handle message");
            self.send_best_effort(message.session, texts::UNEXPECTED)
                .await;
        }
    }

    /// Route one inbound message.
    pub async fn dispatch(&self, message: &InboundMessage) -> Result<Outcome> {
        let Some(text) = message.text.as_deref() else {
            return Ok(Outcome::Ignored);
        };

        if !commands::is_command(text) {
            if let Some(pending) = self.registry.pending(message.session)? {
                self.resolve_follow_up(message, pending.action, text).await?;
                return Ok(Outcome::Resolved(pending.action));
            }
        }

        match Command::parse(text) {
            Some(Command::Start) => {
                self.transport
                    .send_markup(message.session, texts::WELCOME, &commands::main_keyboard())
                    .await?;
                Ok(Outcome::Welcome)
            }
            Some(Command::Sites) => {
                let (header, keyboard) = self.menu.present();
                self.transport
                    .send_markup(message.session, header, &keyboard)
                    .await?;
                Ok(Outcome::Menu)
            }
            Some(Command::Prompt(action)) => {
                self.registry.arm(message.session, action)?;
                debug!(session = %message.session, action = %action, "armed continuation");
                let prompt = texts::prompt(action, &self.developer_username);
                self.transport.send_text(message.session, &prompt).await?;
                Ok(Outcome::Prompted(action))
            }
            None => Ok(Outcome::Ignored),
        }
    }

    async fn resolve_follow_up(
        &self,
        message: &InboundMessage,
        action: Action,
        text: &str,
    ) -> Result<()> {
        let session = message.session;
        let action_texts = texts::for_action(action);

        let progress = match action_texts.progress {
            Some(progress) => match self.transport.send_text(session, progress).await {
                Ok(sent) => Some(sent),
                Err(e) => {
                    warn!(session = %session, error = %e, "failed to send progress message");
                    None
                }
            },
            None => None,
        };

        let resolution = self
            .registry
            .resolve(session, message.caller, text, &self.services)
            .await;

        if let Some(sent) = progress {
            if let Err(e) = self.transport.delete_message(session, sent).await {
                debug!(session = %session, error = %e, "failed to delete progress message");
            }
        }

        // Cleared between the pending check and now; nothing left to answer.
        let Some(Resolution { action, result }) = resolution? else {
            return Ok(());
        };

        self.reply(session, action, result).await
    }

    async fn reply(
        &self,
        session: SessionId,
        action: Action,
        result: OutboundResult,
    ) -> Result<()> {
        let action_texts = texts::for_action(action);

        let payload = match result {
            Ok(payload) => payload,
            Err(ServiceError::EmptyResult) => {
                self.transport.send_text(session, action_texts.empty).await?;
                return Ok(());
            }
            Err(_) => {
                self.transport.send_text(session, action_texts.failed).await?;
                return Ok(());
            }
        };

        match payload {
            Payload::ImageUrl(url) => {
                if let Err(e) = self
                    .transport
                    .send_photo(session, &url, texts::IMAGE_CAPTION)
                    .await
                {
                    warn!(session = %session, error = %e, "failed to send generated image");
                    self.transport.send_text(session, action_texts.failed).await?;
                }
            }
            Payload::Answer(answer) => {
                self.transport
                    .send_text(session, &texts::answer(&answer))
                    .await?;
            }
            Payload::Translation(translated) => {
                self.transport
                    .send_text(session, &texts::translation(&translated))
                    .await?;
            }
            Payload::Delivered => {
                self.transport.send_text(session, texts::CONTACT_SENT).await?;
            }
        }

        Ok(())
    }

    /// Handle one menu selection.
    ///
    /// The selection is acknowledged whatever happens to the reply.
    pub async fn handle_selection(&self, event: SelectionEvent) {
        if let Err(e) = self.select(&event).await {
            error!(selection = ?event.data, error = %e, "failed to handle selection");
            if let Some(session) = event.session {
                self.send_best_effort(session, texts::SITE_FAILED).await;
            }
        }
    }

    /// Reply to a menu selection and acknowledge it.
    pub async fn select(&self, event: &SelectionEvent) -> Result<()> {
        let selection = event.data.as_deref().unwrap_or_default();
        let reply = self.menu.reply_for(selection, event.caller);
        info!(selection, caller = %event.caller, "menu selection");

        let sent = match event.session {
            Some(session) => self.transport.send_text(session, &reply).await.map(drop),
            None => {
                debug!(selection, "selection without a chat, nothing to reply to");
                Ok(())
            }
        };

        if let Err(e) = self.transport.answer_selection(&event.id).await {
            warn!(selection, error = %e, "failed to acknowledge selection");
        }

        sent
    }

    async fn send_best_effort(&self, session: SessionId, text: &str) {
        if let Err(e) = self.transport.send_text(session, text).await {
            warn!(session = %session, error = %e, "failed to send failure notice");
        }
    }
}
