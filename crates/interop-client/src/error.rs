use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("no session token configured")]
    NotLoggedIn,

    #[error("server returned {status}: {message}")]
    Server { status: StatusCode, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// HTTP status for errors the server answered with.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Http(err) => err.status(),
            ClientError::NotLoggedIn => None,
        }
    }
}
