//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure:
//! - Password hashing and verification (Argon2id with explicit cost
//!   parameters and a constant-time digest comparison)
//! - RSA key material loading from PEM text
//! - RS256 token issuance and verification with typed claims and a
//!   two-class token model (access vs refresh)
//!
//! Services define their own domain traits and adapt these implementations;
//! nothing in this crate touches storage or transport.
//!
//! # Examples
//!
//! ## Password hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```no_run
//! use auth::{Claims, RsaKeyPair, TokenCodec, TokenType};
//! use chrono::Duration;
//!
//! let private_pem = std::fs::read_to_string("private.pem").unwrap();
//! let public_pem = std::fs::read_to_string("public.pem").unwrap();
//! let codec = TokenCodec::new(RsaKeyPair::from_pem(&private_pem, &public_pem).unwrap());
//!
//! let claims = Claims::new(
//!     1,
//!     "alice@example.com",
//!     vec!["User".to_string()],
//!     TokenType::Access,
//!     Duration::minutes(15),
//! );
//! let token = codec.issue(&claims).unwrap();
//! let verified = codec.verify(&token, TokenType::Access).unwrap();
//! assert_eq!(verified.user_id, 1);
//! ```

pub mod jwt;
pub mod keys;
pub mod password;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenType;
pub use keys::KeyError;
pub use keys::RsaKeyPair;
pub use password::HashParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
