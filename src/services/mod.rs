//! Outbound service adapters.
//!
//! Each follow-up action is served by one adapter behind the uniform
//! [`OutboundService`] contract: a single attempt, no retry, and an
//! [`OutboundResult`] that is either a payload or a [`ServiceError`].
//!
//! - [`ArtGenerator`] - text prompt to image URL
//! - [`QaClient`] - question to answer text
//! - [`Translator`] - text to translated text over a fixed language pair
//! - [`DeveloperContact`] - forwards a message to the operator chat

mod art;
mod contact;
mod hub;
mod qa;
mod translate;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::session::CallerId;

pub use art::{ArtGenerator, DEFAULT_ENDPOINT as DEFAULT_ART_ENDPOINT};
pub use contact::DeveloperContact;
pub use hub::ServiceHub;
pub use qa::{QaClient, DEFAULT_ENDPOINT as DEFAULT_QA_ENDPOINT};
pub use translate::{Translator, DEFAULT_ENDPOINT as DEFAULT_TRANSLATE_ENDPOINT};

/// Action-specific payload of a successful call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// URL of a generated image.
    ImageUrl(String),
    /// Answer text from the Q&A service.
    Answer(String),
    /// Translated text.
    Translation(String),
    /// Message handed to the operator chat.
    Delivered,
}

/// Why an outbound call produced no payload.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Service was reachable but returned no usable payload.
    #[error("service returned no usable payload")]
    EmptyResult,

    /// Service answered with a non-success HTTP status.
    #[error("service responded with HTTP {0}")]
    Status(StatusCode),

    /// Request could not be sent or its body could not be read.
    #[error("service request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ServiceError {
    /// Whether this is a normal empty answer rather than a transport fault.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ServiceError::EmptyResult)
    }
}

/// Result of a single outbound call.
pub type OutboundResult = std::result::Result<Payload, ServiceError>;

/// A third-party service reached through one call per follow-up message.
#[async_trait]
pub trait OutboundService: Send + Sync {
    /// Call the service once with the caller's follow-up text.
    async fn call(&self, caller: CallerId, input: &str) -> OutboundResult;
}

/// Build the HTTP client shared by the adapters.
///
/// Without a timeout the client default applies.
pub fn http_client(timeout: Option<Duration>) -> crate::Result<Client> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Keep a field only when it carries text.
pub(crate) fn non_empty(value: Option<String>) -> std::result::Result<String, ServiceError> {
    value
        .filter(|s| !s.is_empty())
        .ok_or(ServiceError::EmptyResult)
}

/// Turn a non-success status into [`ServiceError::Status`].
pub(crate) fn check_status(
    response: reqwest::Response,
) -> std::result::Result<reqwest::Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ServiceError::Status(status))
    }
}

/// Read the string at `pointer` from a successful JSON response.
///
/// Any reachable response without that string is an empty result: a blank
/// or `null` body, a body that is not JSON, or a field that is missing,
/// blank or not a string.
pub(crate) async fn text_field(
    response: reqwest::Response,
    pointer: &str,
) -> std::result::Result<String, ServiceError> {
    let body = check_status(response)?.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ServiceError::EmptyResult);
    }

    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "service body is not JSON");
            return Err(ServiceError::EmptyResult);
        }
    };

    non_empty(value.pointer(pointer).and_then(Value::as_str).map(str::to_owned))
}
