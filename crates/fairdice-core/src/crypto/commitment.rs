//! CommitKey and Commitment for the commit-reveal scheme.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha3::Sha3_256;
use std::fmt;

type HmacSha3 = Hmac<Sha3_256>;

/// 256-bit key for a single commitment
///
/// A key is generated fresh for every commitment and never reused; it is
/// disclosed only during the reveal step of its own protocol instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitKey([u8; 32]);

impl CommitKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for CommitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitKey({})", hex::encode(&self.0[..8]))
    }
}

/// Rendered uppercase so the reveal line matches the digest encoding.
impl fmt::Display for CommitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

/// Commitment = HMAC-SHA3-256(key, decimal string of value)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// Create a commitment binding `value` under `key`.
    ///
    /// The message is the UTF-8 decimal encoding of `value`, so the digest
    /// can be recomputed by anyone holding the revealed key and value.
    pub fn new(key: &CommitKey, value: u64) -> Self {
        let mut mac =
            HmacSha3::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
        mac.update(value.to_string().as_bytes());
        let digest = mac.finalize().into_bytes();
        Self(digest.into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify that the given key and value produce this commitment
    pub fn verify(&self, key: &CommitKey, value: u64) -> bool {
        *self == Self::new(key, value)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}
