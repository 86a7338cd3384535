use thiserror::Error;

/// Message used when a failed response carries no readable `message`.
pub const DEFAULT_ERROR_MESSAGE: &str = "request failed";

/// The single failure kind every outbound request resolves to.
///
/// Transport faults (DNS, refused connection, TLS) and non-2xx responses are
/// deliberately folded together; `status` is kept for diagnostics only.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct RequestError {
    message: String,
    status: Option<u16>,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub(crate) fn with_status(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(value: reqwest::Error) -> Self {
        Self {
            message: value.to_string(),
            status: value.status().map(|status| status.as_u16()),
        }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("credential storage failed: {0:#}")]
    Storage(anyhow::Error),
}

#[derive(Debug, Error)]
#[error("failed to render {view}: {source}")]
pub struct RenderError {
    pub view: &'static str,
    #[source]
    pub source: askama::Error,
}
