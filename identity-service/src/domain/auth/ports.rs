use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::Principal;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::User;

/// Port for the authentication operations consumed by the request layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `email` - Raw email string, validated here
    /// * `password` - Plaintext password, hashed before it reaches the store
    ///
    /// # Returns
    /// The created principal
    ///
    /// # Errors
    /// * `InvalidInput` - Email is malformed
    /// * `AlreadyExists` - Store reported a uniqueness conflict on email
    /// * `Password` - Hashing failed (empty password included)
    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal, AuthError>;

    /// Authenticate by email and password.
    ///
    /// # Returns
    /// A fresh access/refresh token pair
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password; the two are
    ///   indistinguishable by design
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchange a refresh token for a brand-new token pair.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, of the wrong class, or the
    ///   account no longer exists; the distinction is never exposed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Acknowledge a logout so the caller can discard client-held tokens.
    ///
    /// No server-side state is mutated; issued tokens stay valid until
    /// their expiry.
    async fn logout(&self, principal_id: i64) -> Result<(), AuthError>;
}

/// Persistence port for account records; implemented outside this crate.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Returns
    /// The stored record with its assigned id
    ///
    /// # Errors
    /// * `AlreadyExists` - Email is already registered
    /// * `Store` - Store operation failed
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;

    /// Look up an account by email.
    ///
    /// # Returns
    /// The record, or `None` when no account has this email
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Look up an account by id.
    ///
    /// # Returns
    /// The record, or `None` when the id is unknown
    ///
    /// # Errors
    /// * `Store` - Store operation failed
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;
}
