//! Question answering adapter.

use async_trait::async_trait;
use reqwest::Client;
use super::{text_field, OutboundResult, OutboundService, Payload};
use crate::session::CallerId;

/// Default Q&A endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://nikai.pages.dev/api/ai";

/// Sends the question as the `q` query parameter.
#[derive(Debug, Clone)]
pub struct QaClient {
    client: Client,
    endpoint: String,
}

impl QaClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl OutboundService for QaClient {
    async fn call(&self, _caller: CallerId, input: &str) -> OutboundResult {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", input)])
            .send()
            .await?;

        text_field(response, "/answer").await.map(Payload::Answer)
    }
}
