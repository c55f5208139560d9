use auth::KeyError;
use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all authentication operations.
///
/// Login and refresh deliberately collapse their internal failure kinds
/// into `InvalidCredentials` and `Unauthorized` respectively, so a caller
/// cannot tell which specific check failed.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("invalid input: {0}")]
    InvalidInput(#[from] EmailError),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("already exists")]
    AlreadyExists,

    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    // Crypto-layer errors; never downgraded silently
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    #[error("key error: {0}")]
    Keys(#[from] KeyError),

    #[error("token error: {0}")]
    Token(#[from] TokenError),

    // Infrastructure errors
    #[error("user store error: {0}")]
    Store(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Internal(err.to_string())
    }
}
