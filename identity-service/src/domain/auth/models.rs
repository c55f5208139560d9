use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::auth::errors::EmailError;

/// Role granted to every account that signs up without explicit roles.
pub const ROLE_USER: &str = "User";
/// Elevated operator role.
pub const ROLE_MANAGER: &str = "Manager";
/// Full administrative role.
pub const ROLE_ADMIN: &str = "Admin";

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account record owned by the external user store.
///
/// The password hash is a self-describing PHC string; this crate never
/// stores or reconstructs it field by field.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: EmailAddress,
    pub password_hash: String,
    pub roles: Vec<String>,
}

/// Account data handed to the store at sign-up, before an id exists.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub roles: Vec<String>,
}

/// Identity fields copied into every issued token.
///
/// Read-only projection of a [`User`]; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: i64,
    pub email: EmailAddress,
    pub roles: Vec<String>,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            roles: user.roles.clone(),
        }
    }
}

/// Access/refresh pair returned on successful login or refresh.
///
/// Never persisted here; how the strings travel (cookie vs bearer header)
/// is the request layer's concern.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}
