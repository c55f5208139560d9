use thiserror::Error;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    SigningFailed(String),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is invalid: {0}")]
    InvalidToken(String),

    #[error("token has expired")]
    TokenExpired,

    #[error("token is not yet valid")]
    TokenNotYetValid,
}
