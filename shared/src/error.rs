use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Poll not found")]
    NotFound,
    #[error("Only the creator can finish the poll")]
    Forbidden,
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    #[error("Poll is finished")]
    PollFinished,
    #[error("Poll is already finished")]
    AlreadyFinished,
    #[error("Poll already exists")]
    Conflict,
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Malformed poll record: {0}")]
    Decode(String),
}

impl PollError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn store(source: impl std::fmt::Display) -> Self {
        Self::StoreUnavailable(source.to_string())
    }

    pub fn decode(source: impl std::fmt::Display) -> Self {
        Self::Decode(source.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PollError>;
