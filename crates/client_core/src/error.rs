use shared::domain::OrderId;
use thiserror::Error;

/// Coarse classification used by views to pick how a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Backend,
    Validation,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("{0}")]
    Validation(String),
    #[error("order {0} is not part of the current snapshot")]
    UnknownOrder(OrderId),
    #[error("{0}")]
    NotFound(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::Backend { .. } | ClientError::NotFound(_) => ErrorKind::Backend,
            ClientError::Validation(_) | ClientError::UnknownOrder(_) => ErrorKind::Validation,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Transport(format!("invalid backend url: {err}"))
    }
}
