//! Secure randomness with unbiased range sampling.

use super::commitment::CommitKey;
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::VecDeque;
use thiserror::Error;

/// Errors from the entropy source
///
/// These are fatal: the protocol must never continue on a weaker RNG.
#[derive(Debug, Error)]
pub enum EntropyError {
    #[error("entropy source failure: {0}")]
    Unavailable(#[from] rand::Error),
}

/// Source of cryptographically strong randomness.
///
/// The two operations cover everything the protocol needs: fresh commitment
/// keys and uniform integers over an inclusive range.
pub trait EntropySource {
    /// Generate a fresh 32-byte commitment key
    fn generate_key(&mut self) -> Result<CommitKey, EntropyError>;

    /// Draw an integer uniformly from `[0, max]`
    fn uniform(&mut self, max: u64) -> Result<u64, EntropyError>;
}

/// Entropy source backed by the operating system CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEntropy {
    rng: OsRng,
}

impl SystemEntropy {
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl EntropySource for SystemEntropy {
    fn generate_key(&mut self) -> Result<CommitKey, EntropyError> {
        let mut bytes = [0u8; 32];
        self.rng.try_fill_bytes(&mut bytes)?;
        Ok(CommitKey::from_bytes(bytes))
    }

    /// Uniform draw by rejection sampling.
    ///
    /// Draws the minimal number of bytes whose range covers `max` and
    /// retries any draw above `max`. This guarantees exact uniformity; a
    /// modulo reduction would over-weight the low end of the range.
    fn uniform(&mut self, max: u64) -> Result<u64, EntropyError> {
        if max == 0 {
            return Ok(0);
        }
        let width = byte_width(max);
        loop {
            let mut buf = [0u8; 8];
            self.rng.try_fill_bytes(&mut buf[8 - width..])?;
            let value = u64::from_be_bytes(buf);
            if value <= max {
                return Ok(value);
            }
        }
    }
}

/// Minimal `k` such that `2^(8k) > max`, at least 1
fn byte_width(max: u64) -> usize {
    let bits = 64 - max.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Scripted entropy source for deterministic protocol tests.
///
/// Returns a fixed commitment key and pops uniform draws from a queue in
/// order. Panics on exhaustion or an out-of-range scripted value, so a test
/// with a wrong script fails loudly.
#[derive(Clone, Debug)]
pub struct MockEntropy {
    key: [u8; 32],
    values: VecDeque<u64>,
}

impl MockEntropy {
    /// Create a mock with the default key and the given uniform draws
    pub fn new(values: impl IntoIterator<Item = u64>) -> Self {
        Self::with_key([7u8; 32], values)
    }

    /// Create a mock with a specific key
    pub fn with_key(key: [u8; 32], values: impl IntoIterator<Item = u64>) -> Self {
        Self {
            key,
            values: values.into_iter().collect(),
        }
    }

    /// Number of scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl EntropySource for MockEntropy {
    fn generate_key(&mut self) -> Result<CommitKey, EntropyError> {
        Ok(CommitKey::from_bytes(self.key))
    }

    fn uniform(&mut self, max: u64) -> Result<u64, EntropyError> {
        if max == 0 {
            return Ok(0);
        }
        let value = self
            .values
            .pop_front()
            .expect("MockEntropy ran out of scripted values");
        assert!(
            value <= max,
            "scripted value {value} exceeds requested range 0..={max}"
        );
        Ok(value)
    }
}
