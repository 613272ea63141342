use reqwest::StatusCode;
use thiserror::Error;

/// Missing or unusable configuration detected before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set (environment or .env file)")]
    Missing(&'static str),

    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Failures talking to the catalog API or its token endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("token exchange failed with status {status}: {body}")]
    TokenExchange { status: StatusCode, body: String },

    #[error("HTTP error {status}")]
    Http { status: StatusCode },

    #[error("rate limited: still receiving 429 after {attempts} attempts")]
    RetryBudgetExhausted { attempts: u32 },

    #[error("playlist {0} not found")]
    PlaylistNotFound(String),

    #[error("cannot build a request URL from {0:?}")]
    InvalidLink(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("cannot decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Failures persisting the export document.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot serialize export document: {0}")]
    Serde(#[from] serde_json::Error),
}
