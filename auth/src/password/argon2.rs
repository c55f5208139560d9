use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Argon2id cost parameters.
///
/// All bounds are checked before any hashing work is performed, so weak
/// settings never produce a hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Number of passes over the memory (time cost).
    pub iterations: u32,
    /// Memory size in KiB.
    pub memory_kib: u32,
    /// Number of parallel lanes.
    pub parallelism: u32,
    /// Length of the derived key in bytes.
    pub output_len: usize,
}

impl HashParams {
    const MIN_ITERATIONS: u32 = 2;
    const MIN_MEMORY_KIB: u32 = 32 * 1024;
    const MAX_PARALLELISM: u32 = 64;
    const MIN_OUTPUT_LEN: usize = 16;
    const MAX_OUTPUT_LEN: usize = 512;
    const MIN_MEMORY_KIB_PER_LANE: u32 = 8 * 1024;

    /// Check the parameters against minimum-security bounds.
    ///
    /// # Errors
    /// * `InvalidParams` - A parameter falls outside the accepted range
    pub fn validate(&self) -> Result<(), PasswordError> {
        if self.iterations < Self::MIN_ITERATIONS {
            return Err(PasswordError::InvalidParams(format!(
                "time cost too low (min: {})",
                Self::MIN_ITERATIONS
            )));
        }
        if self.memory_kib < Self::MIN_MEMORY_KIB {
            return Err(PasswordError::InvalidParams(format!(
                "memory cost too low (min: {} KiB)",
                Self::MIN_MEMORY_KIB
            )));
        }
        if self.parallelism < 1 {
            return Err(PasswordError::InvalidParams(
                "parallelism must be at least 1".to_string(),
            ));
        }
        if self.parallelism > Self::MAX_PARALLELISM {
            return Err(PasswordError::InvalidParams(format!(
                "parallelism too high (max: {})",
                Self::MAX_PARALLELISM
            )));
        }
        if self.output_len < Self::MIN_OUTPUT_LEN {
            return Err(PasswordError::InvalidParams(format!(
                "key length too short (min: {} bytes)",
                Self::MIN_OUTPUT_LEN
            )));
        }
        if self.output_len > Self::MAX_OUTPUT_LEN {
            return Err(PasswordError::InvalidParams(format!(
                "key length too long (max: {} bytes)",
                Self::MAX_OUTPUT_LEN
            )));
        }
        if self.memory_kib < self.parallelism * Self::MIN_MEMORY_KIB_PER_LANE {
            return Err(PasswordError::InvalidParams(format!(
                "memory cost must be at least {} KiB per lane",
                Self::MIN_MEMORY_KIB_PER_LANE
            )));
        }
        Ok(())
    }
}

impl Default for HashParams {
    /// OWASP-aligned defaults: 3 passes over 64 MiB with 4 lanes, 32-byte key.
    fn default() -> Self {
        Self {
            iterations: 3,
            memory_kib: 64 * 1024,
            parallelism: 4,
            output_len: 32,
        }
    }
}

/// Password hashing implementation (Argon2id).
///
/// Stateless; safe to share across concurrent callers.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with the default cost parameters.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`)
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `HashingFailed` - Key derivation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.hash_with_params(password, &HashParams::default())
    }

    /// Hash a plaintext password with explicit cost parameters.
    ///
    /// A fresh 16-byte random salt is drawn per call, so two calls with the
    /// same input never produce the same output.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    /// * `params` - Cost parameters, validated before hashing
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `InvalidParams` - Parameters fall outside the accepted bounds
    /// * `HashingFailed` - Key derivation failed
    pub fn hash_with_params(
        &self,
        password: &str,
        params: &HashParams,
    ) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }
        params.validate()?;

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = argon2_instance(params)?;

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC-format hash.
    ///
    /// The digest is recomputed with the parameters embedded in the stored
    /// text, never the caller's defaults, and compared in constant time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored` - Stored hash in PHC string format
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Stored text cannot be parsed, names a different
    ///   algorithm, or carries an unsupported version
    /// * `HashingFailed` - Key derivation failed during recomputation
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, PasswordError> {
        let parsed =
            PasswordHash::new(stored).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        if parsed.algorithm.as_str() != "argon2id" {
            return Err(PasswordError::MalformedHash(
                "algorithm must be argon2id".to_string(),
            ));
        }
        match parsed.version {
            Some(v) if v == Version::V0x13 as u32 => {}
            _ => {
                return Err(PasswordError::MalformedHash(
                    "unsupported argon2 version".to_string(),
                ))
            }
        }

        let params =
            Params::try_from(&parsed).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;
        let salt = parsed
            .salt
            .ok_or_else(|| PasswordError::MalformedHash("missing salt".to_string()))?;
        let expected = parsed
            .hash
            .ok_or_else(|| PasswordError::MalformedHash("missing digest".to_string()))?;

        let mut salt_buf = [0u8; 64];
        let raw_salt = salt
            .decode_b64(&mut salt_buf)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let mut computed = vec![0u8; expected.len()];
        argon2
            .hash_password_into(password.as_bytes(), raw_salt, &mut computed)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(computed.ct_eq(expected.as_bytes()).into())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn argon2_instance(params: &HashParams) -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(params.output_len),
    )
    .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}
