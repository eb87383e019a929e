use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be built, sent, or its body could not be read.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A mutating call was answered with something other than `200 OK`.
    /// Displays as the status line the server sent, e.g. `403 Forbidden`.
    #[error("{line}")]
    Status { status: StatusCode, line: String },

    /// The response body was not JSON of the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Builds a status error, preferring the reason phrase the server sent
    /// over the canonical one.
    pub fn from_status(status: StatusCode, reason: Option<&[u8]>) -> Self {
        let reason = reason
            .map(String::from_utf8_lossy)
            .filter(|reason| !reason.trim().is_empty())
            .or_else(|| status.canonical_reason().map(Into::into));

        let line = match reason {
            Some(reason) => format!("{} {}", status.as_str(), reason.trim()),
            None => status.as_str().to_string(),
        };
        Error::Status { status, line }
    }

    /// The HTTP status of a rejected mutating call.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport(err) => err.status(),
            Error::Decode(_) => None,
        }
    }
}

impl From<StatusCode> for Error {
    fn from(status: StatusCode) -> Self {
        Error::from_status(status, None)
    }
}
