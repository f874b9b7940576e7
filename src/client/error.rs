use thiserror::Error;

/// Everything that can go wrong in one GraphQL exchange.
///
/// The `Display` output is what the board shows to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("Request failed: {status}")]
    Transport { status: u16 },

    /// First entry of the response's `errors` array.
    #[error("{message}{}", code_suffix(.code))]
    Graphql {
        message: String,
        code: Option<String>,
    },

    #[error("No data returned from GraphQL")]
    EmptyResponse,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|code| format!(" ({code})"))
        .unwrap_or_default()
}
