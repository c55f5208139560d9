use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("empty password not allowed")]
    EmptyPassword,

    #[error("invalid cost parameters: {0}")]
    InvalidParams(String),

    #[error("malformed password hash: {0}")]
    MalformedHash(String),

    #[error("password hashing failed: {0}")]
    HashingFailed(String),
}
