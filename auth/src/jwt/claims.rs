use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Class of an issued token.
///
/// Access tokens are short-lived and presented on every request; refresh
/// tokens are long-lived and only ever exchanged for a new pair. A token of
/// one class must never validate as the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims carried by every issued token.
///
/// Identity fields are a snapshot taken at issuance; consumers that need
/// current roles must re-resolve the subject instead of trusting the copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject identifier.
    pub user_id: i64,

    /// Email at issuance time.
    pub email: String,

    /// Role names at issuance time.
    pub roles: Vec<String>,

    /// Token class.
    #[serde(rename = "type")]
    pub token_type: TokenType,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issued at (Unix timestamp).
    pub iat: i64,
}

impl Claims {
    /// Build claims for a subject with `iat = now` and `exp = now + ttl`.
    ///
    /// # Arguments
    /// * `user_id` - Subject identifier
    /// * `email` - Subject email
    /// * `roles` - Subject role names
    /// * `token_type` - Token class to stamp into the claims
    /// * `ttl` - Lifetime from now; a non-positive duration yields an
    ///   already-expired token
    pub fn new(
        user_id: i64,
        email: impl Into<String>,
        roles: Vec<String>,
        token_type: TokenType,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id,
            email: email.into(),
            roles,
            token_type,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}
