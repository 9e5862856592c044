//! Driven port for password hashing and verification.
//!
//! Services never see digest internals; they hand plaintext to this port
//! and store whatever opaque string comes back.

/// Errors raised by password hasher adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHasherError {
    /// A stored digest did not match the adapter's expected shape.
    #[error("password digest is malformed")]
    MalformedDigest,
    /// A stored digest names a scheme this adapter does not speak.
    #[error("unsupported digest scheme `{scheme}`")]
    UnsupportedScheme {
        /// The scheme tag found in the digest.
        scheme: String,
    },
}

impl PasswordHasherError {
    /// Build a [`PasswordHasherError::UnsupportedScheme`] error.
    pub fn unsupported_scheme(scheme: impl Into<String>) -> Self {
        Self::UnsupportedScheme {
            scheme: scheme.into(),
        }
    }
}

/// Port for producing and checking password digests.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Digest a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Check a plaintext password against a stored digest.
    fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordHasherError>;
}

/// Transparent hasher for tests: digests are `plain$<password>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePasswordHasher;

impl PasswordHasher for FixturePasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        Ok(format!("plain${password}"))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordHasherError> {
        let stored = digest
            .strip_prefix("plain$")
            .ok_or(PasswordHasherError::MalformedDigest)?;
        Ok(stored == password)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn fixture_hasher_round_trips() {
        let hasher = FixturePasswordHasher;
        let digest = hasher.hash("Password123").expect("hashing succeeds");
        assert!(hasher
            .verify("Password123", &digest)
            .expect("verification succeeds"));
        assert!(!hasher
            .verify("Password124", &digest)
            .expect("verification succeeds"));
    }

    #[rstest]
    fn fixture_hasher_rejects_foreign_digests() {
        let hasher = FixturePasswordHasher;
        let err = hasher
            .verify("Password123", "v1$salt$digest")
            .expect_err("foreign digest must fail");
        assert_eq!(err, PasswordHasherError::MalformedDigest);
    }
}
