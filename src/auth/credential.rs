//! Shared-secret comparison used by the app key and god key checks.
//!
//! Only the SHA-256 digest of a configured secret is kept in memory.
//! Presented values are hashed and compared in constant time, so neither
//! the secret's length nor a matching prefix is observable through timing.

use std::fmt;

use axum::http::HeaderValue;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Why a presented credential was refused.
///
/// Both variants map to the same response for the caller; the split
/// exists for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFault {
    Missing,
    Invalid,
}

impl fmt::Display for CredentialFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialFault::Missing => f.write_str("missing"),
            CredentialFault::Invalid => f.write_str("invalid"),
        }
    }
}

/// A configured secret, held as its digest and wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    digest: [u8; 32],
}

impl SharedSecret {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            digest: sha256(secret.as_ref()),
        }
    }

    /// Constant-time check of raw bytes against this secret.
    pub fn matches_bytes(&self, presented: &[u8]) -> bool {
        let presented = sha256(presented);
        self.digest[..].ct_eq(&presented[..]).into()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

fn sha256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Verify a presented header value against a configured secret.
///
/// An absent header is `Missing`; anything present that is not byte-for-byte
/// equal to the secret (empty, wrong, or not valid UTF-8) is `Invalid`.
pub fn verify(presented: Option<&HeaderValue>, secret: &SharedSecret) -> Result<(), CredentialFault> {
    let value = presented.ok_or(CredentialFault::Missing)?;
    if secret.matches_bytes(value.as_bytes()) {
        Ok(())
    } else {
        Err(CredentialFault::Invalid)
    }
}

/// Boolean form of [`verify`].
pub fn matches(presented: Option<&HeaderValue>, secret: &SharedSecret) -> bool {
    verify(presented, secret).is_ok()
}
