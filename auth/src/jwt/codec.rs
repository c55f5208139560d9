use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenType;
use super::errors::TokenError;
use crate::keys::RsaKeyPair;

/// Signs and verifies RS256 tokens carrying [`Claims`].
///
/// Holds the process-wide key pair; stateless beyond that and safe to share
/// across concurrent callers.
pub struct TokenCodec {
    keys: RsaKeyPair,
}

impl TokenCodec {
    /// Create a codec over an RSA key pair.
    pub fn new(keys: RsaKeyPair) -> Self {
        Self { keys }
    }

    /// Sign claims into a compact token string.
    ///
    /// # Arguments
    /// * `claims` - Claims to embed; `iat`/`exp` are taken as-is
    ///
    /// # Errors
    /// * `SigningFailed` - RSA signing failed
    pub fn issue(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(Algorithm::RS256);

        encode(&header, claims, &self.keys.encoding)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token against the public key and the expected class.
    ///
    /// Checks run in a fixed order: signature, claim structure, expiry,
    /// issued-in-future guard, class match. The class check is a security
    /// property in its own right; it stops a refresh token from being
    /// replayed as an access token and vice versa.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `expected` - Class the caller requires
    ///
    /// # Errors
    /// * `InvalidSignature` - Tampered token or wrong signing key
    /// * `InvalidToken` - Structural failure or class mismatch
    /// * `TokenExpired` - `exp` is in the past
    /// * `TokenNotYetValid` - `iat` is in the future
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                _ => TokenError::InvalidToken(e.to_string()),
            }
        })?;
        let claims = data.claims;

        // Clock-skew guard: a token stamped in the future was signed by a
        // peer whose clock we cannot trust.
        if claims.iat > Utc::now().timestamp() {
            return Err(TokenError::TokenNotYetValid);
        }

        if claims.token_type != expected {
            return Err(TokenError::InvalidToken(format!(
                "expected {} token, got {}",
                expected, claims.token_type
            )));
        }

        Ok(claims)
    }
}
