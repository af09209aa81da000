use shared::domain::BlogId;
use thiserror::Error;

/// Failures surfaced by the data access layer.
///
/// Cloneable so the coordinator can keep the last failure in its snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with HTTP {status}")]
    Http { status: u16 },
    #[error("blog {id} not found")]
    NotFound { id: BlogId },
    #[error("blog rejected by server (HTTP {status}): {message}")]
    Validation { status: u16, message: String },
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } | Self::Validation { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Decode(value.to_string());
        }
        if let Some(status) = value.status() {
            return Self::Http {
                status: status.as_u16(),
            };
        }
        Self::Network(value.to_string())
    }
}
