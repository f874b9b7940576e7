//! Request and response envelopes for a single GraphQL exchange.
//!
//! Building the request body and interpreting the response are pure
//! functions; [`crate::client::GraphqlClient`] only moves bytes between
//! them. No retries, caching or batching happen here.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::client::error::ClientError;

/// Outgoing envelope: one operation document plus its variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    pub query: String,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<ErrorItem>>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorItem {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorExtensions {
    pub code: Option<String>,
}

pub fn build_request(query: &str, variables: Value) -> RequestEnvelope {
    RequestEnvelope {
        query: query.to_string(),
        variables,
    }
}

/// Interpret a raw HTTP status and body as the `data` of type `T`.
pub fn parse_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::Transport { status });
    }

    let envelope: ResponseEnvelope<T> = serde_json::from_str(body)?;

    if let Some(first) = envelope.errors.into_iter().flatten().next() {
        return Err(ClientError::Graphql {
            message: first.message,
            code: first.extensions.and_then(|ext| ext.code),
        });
    }

    envelope.data.ok_or(ClientError::EmptyResponse)
}
