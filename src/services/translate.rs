//! Translation adapter.

use async_trait::async_trait;
use reqwest::Client;

use super::{text_field, OutboundResult, OutboundService, Payload};
use crate::session::CallerId;

/// Default translation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Translates over one fixed language pair, sent as `langpair=src|dst`.
#[derive(Debug, Clone)]
pub struct Translator {
    client: Client,
    endpoint: String,
    lang_pair: String,
}

impl Translator {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        source: &str,
        target: &str,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            lang_pair: format!("{source}|{target}"),
        }
    }

    pub fn lang_pair(&self) -> &str {
        &self.lang_pair
    }
}

#[async_trait]
impl OutboundService for Translator {
    async fn call(&self, _caller: CallerId, input: &str) -> OutboundResult {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", input), ("langpair", self.lang_pair.as_str())])
            .send()
            .await?;

        text_field(response, "/responseData/translatedText")
            .await
            .map(Payload::Translation)
    }
}
