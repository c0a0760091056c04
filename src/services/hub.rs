//! Action to adapter routing.

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, info, warn};

use super::{
    ArtGenerator, DeveloperContact, OutboundResult, OutboundService, QaClient, Translator,
};
use crate::config::ServicesSection;
use crate::session::{Action, CallerId, SessionId};
use crate::transport::Transport;

/// One adapter per [`Action`].
#[derive(Clone)]
pub struct ServiceHub {
    image: Arc<dyn OutboundService>,
    qa: Arc<dyn OutboundService>,
    translate: Arc<dyn OutboundService>,
    contact: Arc<dyn OutboundService>,
}

impl ServiceHub {
    pub fn new(
        image: Arc<dyn OutboundService>,
        qa: Arc<dyn OutboundService>,
        translate: Arc<dyn OutboundService>,
        contact: Arc<dyn OutboundService>,
    ) -> Self {
        Self {
            image,
            qa,
            translate,
            contact,
        }
    }

    /// Build the production adapters from configuration.
    pub fn from_config(
        section: &ServicesSection,
        client: Client,
        transport: Arc<dyn Transport>,
        operator: Option<SessionId>,
    ) -> Self {
        Self::new(
            Arc::new(ArtGenerator::new(client.clone(), &section.image_url)),
            Arc::new(QaClient::new(client.clone(), &section.qa_url)),
            Arc::new(Translator::new(
                client,
                &section.translate_url,
                &section.source_lang,
                &section.target_lang,
            )),
            Arc::new(DeveloperContact::new(transport, operator)),
        )
    }

    /// Adapter serving the action.
    pub fn adapter(&self, action: Action) -> &Arc<dyn OutboundService> {
        match action {
            Action::GenerateImage => &self.image,
            Action::AskAi => &self.qa,
            Action::Translate => &self.translate,
            Action::ContactDeveloper => &self.contact,
        }
    }

    /// Call the adapter for the action once.
    ///
    /// Failures are logged here and returned to the caller unchanged.
    pub async fn call(&self, action: Action, caller: CallerId, input: &str) -> OutboundResult {
        debug!(action = %action, caller = %caller, "calling outbound service");
        let result = self.adapter(action).call(caller, input).await;

        match &result {
            Ok(_) => debug!(action = %action, "outbound service succeeded"),
            Err(e) if e.is_empty_result() => {
                info!(action = %action, "outbound service returned no payload")
            }
            Err(e) => warn!(action = %action, error = %e, "outbound service failed"),
        }

        result
    }
}
