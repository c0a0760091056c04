//! Developer contact relay.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::{OutboundResult, OutboundService, Payload};
use crate::dispatch::texts;
use crate::session::{CallerId, SessionId};
use crate::transport::Transport;

/// Forwards the caller's message to the operator chat.
///
/// Always reports [`Payload::Delivered`]: a failed or impossible delivery
/// is logged for the operator and never surfaced to the caller.
pub struct DeveloperContact {
    transport: Arc<dyn Transport>,
    operator: Option<SessionId>,
}

impl DeveloperContact {
    pub fn new(transport: Arc<dyn Transport>, operator: Option<SessionId>) -> Self {
        Self {
            transport,
            operator,
        }
    }
}

#[async_trait]
impl OutboundService for DeveloperContact {
    async fn call(&self, caller: CallerId, input: &str) -> OutboundResult {
        let Some(operator) = self.operator else {
            warn!(caller = %caller, "no operator chat configured, developer message dropped");
            return Ok(Payload::Delivered);
        };

        let forwarded = texts::operator_forward(input, caller);
        match self.transport.send_text(operator, &forwarded).await {
            Ok(_) => info!(caller = %caller, operator = %operator, "forwarded developer message"),
            Err(e) => warn!(
                caller = %caller,
                operator = %operator,
                error = %e,
                "failed to forward developer message"
            ),
        }

        Ok(Payload::Delivered)
    }
}
