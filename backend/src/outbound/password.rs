//! Salted SHA-256 password hasher.
//!
//! Digests are stored as `v1$<salt-hex>$<digest-hex>`. The scheme tag lets a
//! future adapter recognise and migrate old digests instead of guessing.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

const SCHEME: &str = "v1";
const SALT_LEN: usize = 16;

/// [`PasswordHasher`] adapter producing salted SHA-256 digests.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn digest_bytes(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let mut salt = [0_u8; SALT_LEN];
        rand::rng().fill_bytes(&mut salt);
        let digest = digest_bytes(&salt, password);
        Ok(format!(
            "{SCHEME}${}${}",
            hex::encode(salt),
            hex::encode(digest)
        ))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, PasswordHasherError> {
        let (scheme, rest) = digest
            .split_once('$')
            .ok_or(PasswordHasherError::MalformedDigest)?;
        if scheme != SCHEME {
            return Err(PasswordHasherError::unsupported_scheme(scheme));
        }
        let (salt_hex, stored_hex) = rest
            .split_once('$')
            .ok_or(PasswordHasherError::MalformedDigest)?;
        let salt = hex::decode(salt_hex).map_err(|_| PasswordHasherError::MalformedDigest)?;
        if salt.is_empty() {
            return Err(PasswordHasherError::MalformedDigest);
        }
        let stored = hex::decode(stored_hex).map_err(|_| PasswordHasherError::MalformedDigest)?;
        Ok(digest_bytes(&salt, password).as_slice() == stored.as_slice())
    }
}
