use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordHasher;
use auth::RsaKeyPair;
use auth::TokenCodec;
use auth::TokenType;
use chrono::Duration;
use chrono::Utc;

use crate::config::JwtConfig;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::Principal;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::models::User;
use crate::domain::auth::models::ROLE_USER;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserStore;

/// Authentication service implementation.
///
/// Orchestrates the password hasher, the token codec, and the injected
/// user store. Holds no mutable state; the key pair inside the codec is
/// read-only for the process lifetime.
pub struct AuthService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    hasher: PasswordHasher,
    codec: TokenCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl<S> AuthService<S>
where
    S: UserStore,
{
    /// Create a new service over parsed key material.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `keys` - RSA key pair for token signing and verification
    /// * `access_ttl` - Access token lifetime (minutes scale)
    /// * `refresh_ttl` - Refresh token lifetime (days scale)
    pub fn new(store: Arc<S>, keys: RsaKeyPair, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            store,
            hasher: PasswordHasher::new(),
            codec: TokenCodec::new(keys),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Build the service from configuration.
    ///
    /// Key parsing happens here, once. A failure must abort startup; the
    /// service cannot run without a valid signing key.
    ///
    /// # Errors
    /// * `Keys` - PEM key material did not parse
    pub fn from_config(store: Arc<S>, jwt: &JwtConfig) -> Result<Self, AuthError> {
        let keys = RsaKeyPair::from_pem(&jwt.private_key_pem, &jwt.public_key_pem)?;

        Ok(Self::new(
            store,
            keys,
            Duration::minutes(jwt.access_expiration_min),
            Duration::days(jwt.refresh_expiration_day),
        ))
    }

    /// Issue a fresh access/refresh pair for an account.
    fn issue_pair(&self, user: &User) -> Result<TokenPair, AuthError> {
        let access_token = self.codec.issue(&Claims::new(
            user.id,
            user.email.as_str(),
            user.roles.clone(),
            TokenType::Access,
            self.access_ttl,
        ))?;

        let refresh_expires_at = Utc::now() + self.refresh_ttl;
        let refresh_token = self.codec.issue(&Claims::new(
            user.id,
            user.email.as_str(),
            user.roles.clone(),
            TokenType::Refresh,
            self.refresh_ttl,
        ))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            refresh_expires_at,
        })
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: UserStore,
{
    async fn sign_up(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let email = EmailAddress::new(email.to_string())?;
        let password_hash = self.hasher.hash(password)?;

        let created = self
            .store
            .create(NewUser {
                email,
                password_hash,
                roles: vec![ROLE_USER.to_string()],
            })
            .await?;

        Ok(Principal::from(&created))
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        // Unknown email and wrong password are indistinguishable to the
        // caller; only the timing of the hash check differs.
        let user = match self.store.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(AuthError::InvalidCredentials),
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_pair(&user)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self
            .codec
            .verify(refresh_token, TokenType::Refresh)
            .map_err(|e| {
                tracing::debug!(error = %e, "refresh token rejected");
                AuthError::Unauthorized
            })?;

        // Re-resolve the account: embedded email and roles may be stale,
        // and a deleted account must not be able to mint new tokens.
        let user = match self.store.find_by_id(claims.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) | Err(AuthError::NotFound) => return Err(AuthError::Unauthorized),
            Err(e) => return Err(e),
        };

        self.issue_pair(&user)
    }

    async fn logout(&self, principal_id: i64) -> Result<(), AuthError> {
        // Nothing to revoke server-side; the client discards its copies and
        // the request layer expires the refresh cookie.
        // TODO: add a denylist keyed by token id once a shared short-lived
        // store is available, and hold entries until token expiry.
        tracing::debug!(user_id = principal_id, "logout acknowledged");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::testutil;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;

    mock! {
        pub TestUserStore {}

        #[async_trait]
        impl UserStore for TestUserStore {
            async fn create(&self, user: NewUser) -> Result<User, AuthError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
            async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;
        }
    }

    fn service(store: MockTestUserStore) -> AuthService<MockTestUserStore> {
        AuthService::new(
            Arc::new(store),
            testutil::test_key_pair(),
            Duration::minutes(15),
            Duration::days(30),
        )
    }

    fn stored_user(password: &str) -> User {
        let hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash password");

        User {
            id: 1,
            email: EmailAddress::new("john@example.com".to_string()).unwrap(),
            password_hash: hash,
            roles: vec![ROLE_USER.to_string()],
        }
    }

    #[tokio::test]
    async fn test_sign_up_success() {
        let mut store = MockTestUserStore::new();

        store
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "john@example.com"
                    && user.password_hash.starts_with("$argon2id$")
                    && user.roles == vec![ROLE_USER.to_string()]
            })
            .times(1)
            .returning(|user| {
                Ok(User {
                    id: 1,
                    email: user.email,
                    password_hash: user.password_hash,
                    roles: user.roles,
                })
            });

        let service = service(store);
        let principal = service
            .sign_up("john@example.com", "password123456")
            .await
            .expect("Sign-up failed");

        assert_eq!(principal.id, 1);
        assert_eq!(principal.email.as_str(), "john@example.com");
        assert_eq!(principal.roles, vec![ROLE_USER.to_string()]);
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let mut store = MockTestUserStore::new();

        store
            .expect_create()
            .times(1)
            .returning(|_| Err(AuthError::AlreadyExists));

        let service = service(store);
        let result = service.sign_up("john@example.com", "password123456").await;

        assert!(matches!(result, Err(AuthError::AlreadyExists)));
    }

    #[tokio::test]
    async fn test_sign_up_malformed_email() {
        let mut store = MockTestUserStore::new();
        store.expect_create().times(0);

        let service = service(store);
        let result = service.sign_up("not-an-email", "password123456").await;

        assert!(matches!(result, Err(AuthError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut store = MockTestUserStore::new();
        let user = stored_user("password123456");

        store
            .expect_find_by_email()
            .withf(|email| email == "john@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(store);
        let pair = service
            .login("john@example.com", "password123456")
            .await
            .expect("Login failed");

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert!(pair.refresh_expires_at > Utc::now());

        // The issued access token resolves back to the stored account.
        let claims = testutil::test_codec()
            .verify(&pair.access_token, TokenType::Access)
            .expect("Access token must verify");
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.email, "john@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut store = MockTestUserStore::new();
        let user = stored_user("password123456");

        store
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(store);
        let result = service.login("john@example.com", "wrong").await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let mut store = MockTestUserStore::new();

        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(store);
        let result = service.login("ghost@example.com", "password123456").await;

        // Same error as a wrong password, so callers cannot probe for
        // registered addresses.
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    /// Refresh token for subject 1, backdated one minute so the rotated
    /// replacement is guaranteed to differ.
    fn backdated_refresh_token() -> String {
        let mut claims = Claims::new(
            1,
            "john@example.com",
            vec![ROLE_USER.to_string()],
            TokenType::Refresh,
            Duration::days(30),
        );
        claims.iat -= 60;
        claims.exp -= 60;

        testutil::test_codec()
            .issue(&claims)
            .expect("Failed to issue refresh token")
    }

    #[tokio::test]
    async fn test_refresh_rotates_pair() {
        let mut store = MockTestUserStore::new();
        let user = stored_user("password123456");

        store
            .expect_find_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(store);
        let old_refresh = backdated_refresh_token();
        let pair = service
            .refresh(&old_refresh)
            .await
            .expect("Refresh failed");

        assert_ne!(pair.refresh_token, old_refresh);

        let claims = testutil::test_codec()
            .verify(&pair.access_token, TokenType::Access)
            .expect("Rotated access token must verify");
        assert_eq!(claims.user_id, 1);
    }

    #[tokio::test]
    async fn test_refresh_unknown_user_is_unauthorized() {
        let mut store = MockTestUserStore::new();

        store
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(store);
        let result = service.refresh(&backdated_refresh_token()).await;

        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_refresh_store_not_found_is_unauthorized() {
        let mut store = MockTestUserStore::new();

        store
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(AuthError::NotFound));

        let service = service(store);
        let result = service.refresh(&backdated_refresh_token()).await;

        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_access_token() {
        let mut store = MockTestUserStore::new();
        store.expect_find_by_id().times(0);

        let access = testutil::test_codec()
            .issue(&Claims::new(
                1,
                "john@example.com",
                vec![ROLE_USER.to_string()],
                TokenType::Access,
                Duration::minutes(15),
            ))
            .unwrap();

        let service = service(store);
        let result = service.refresh(&access).await;

        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage() {
        let mut store = MockTestUserStore::new();
        store.expect_find_by_id().times(0);

        let service = service(store);
        let result = service.refresh("invalid.token.here").await;

        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_logout_acknowledges() {
        let store = MockTestUserStore::new();
        let service = service(store);

        assert!(service.logout(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_from_config_rejects_bad_keys() {
        use crate::config::CookieConfig;

        let store = MockTestUserStore::new();
        let jwt = JwtConfig {
            private_key_pem: "not a key".to_string(),
            public_key_pem: testutil::TEST_RSA_PUBLIC_PEM.to_string(),
            access_expiration_min: 15,
            refresh_expiration_day: 30,
            cookie: CookieConfig::default(),
        };

        let result = AuthService::from_config(Arc::new(store), &jwt);
        assert!(matches!(result, Err(AuthError::Keys(_))));
    }

    #[tokio::test]
    async fn test_from_config_builds_working_service() {
        use crate::config::CookieConfig;

        let mut store = MockTestUserStore::new();
        let user = stored_user("password123456");
        store
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let jwt = JwtConfig {
            private_key_pem: testutil::TEST_RSA_PRIVATE_PEM.to_string(),
            public_key_pem: testutil::TEST_RSA_PUBLIC_PEM.to_string(),
            access_expiration_min: 15,
            refresh_expiration_day: 30,
            cookie: CookieConfig::default(),
        };

        let service = AuthService::from_config(Arc::new(store), &jwt).expect("Config must build");
        let pair = service
            .login("john@example.com", "password123456")
            .await
            .expect("Login failed");

        assert!(pair.refresh_expires_at > Utc::now());
    }
}
