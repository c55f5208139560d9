//! Shared fixtures for token and key tests.
//!
//! Feature-gated behind `testutil` so fixture key material never reaches
//! production builds. Dependent crates enable it for their own tests:
//!
//! ```toml
//! [dev-dependencies]
//! auth = { path = "../auth", features = ["testutil"] }
//! ```

use jsonwebtoken::EncodingKey;

use crate::jwt::TokenCodec;
use crate::keys::RsaKeyPair;

/// 2048-bit RSA private key (PKCS#1 PEM). Fixture only, never deploy.
pub const TEST_RSA_PRIVATE_PEM: &str = include_str!("../testdata/rsa_private.pem");

/// Public half of [`TEST_RSA_PRIVATE_PEM`] (PKIX PEM).
pub const TEST_RSA_PUBLIC_PEM: &str = include_str!("../testdata/rsa_public.pem");

/// Second, unrelated key pair for wrong-key tests.
pub const OTHER_RSA_PRIVATE_PEM: &str = include_str!("../testdata/rsa_private_other.pem");

/// Public half of [`OTHER_RSA_PRIVATE_PEM`].
pub const OTHER_RSA_PUBLIC_PEM: &str = include_str!("../testdata/rsa_public_other.pem");

/// Key pair over the primary fixture keys.
pub fn test_key_pair() -> RsaKeyPair {
    RsaKeyPair::from_pem(TEST_RSA_PRIVATE_PEM, TEST_RSA_PUBLIC_PEM)
        .expect("fixture keys must parse")
}

/// Codec over the primary fixture key pair.
pub fn test_codec() -> TokenCodec {
    TokenCodec::new(test_key_pair())
}

/// Codec over the second key pair; tokens it issues must fail verification
/// against [`test_codec`].
pub fn other_codec() -> TokenCodec {
    TokenCodec::new(
        RsaKeyPair::from_pem(OTHER_RSA_PRIVATE_PEM, OTHER_RSA_PUBLIC_PEM)
            .expect("fixture keys must parse"),
    )
}

/// Raw encoding key for forging test tokens with arbitrary payloads.
pub fn test_encoding_key() -> EncodingKey {
    test_key_pair().encoding
}
