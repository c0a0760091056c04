//! Image generation adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{text_field, OutboundResult, OutboundService, Payload};
use crate::session::CallerId;

/// Default image generation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ai-api.magicstudio.com/api/ai-art-generator";

#[derive(Serialize)]
struct ArtRequest<'a> {
    prompt: &'a str,
}

/// Posts a text prompt and expects an image URL back.
#[derive(Debug, Clone)]
pub struct ArtGenerator {
    client: Client,
    endpoint: String,
}

impl ArtGenerator {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl OutboundService for ArtGenerator {
    async fn call(&self, _caller: CallerId, input: &str) -> OutboundResult {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ArtRequest { prompt: input })
            .send()
            .await?;

        text_field(response, "/url").await.map(Payload::ImageUrl)
    }
}
