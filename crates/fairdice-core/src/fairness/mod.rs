//! Commit-reveal protocol for jointly produced random values.
//!
//! One fairness decision runs `Uncommitted -> Committed -> Opened`:
//! [`FairCommit::begin`] draws the hidden value and binds it under a fresh
//! key, only the digest is shown to the counterparty, and [`FairCommit::open`]
//! consumes the commitment once the counterparty has answered. There is no
//! rollback; the next decision point starts from a fresh instance.

use crate::crypto::{CommitKey, Commitment, EntropyError, EntropySource};
use serde::{Deserialize, Serialize};

/// A pending commitment: the hidden value is drawn and bound, not yet revealed
#[derive(Debug)]
pub struct FairCommit {
    secret: u64,
    key: CommitKey,
    commitment: Commitment,
    max: u64,
}

impl FairCommit {
    /// Draw a secret uniformly from `[0, max]` and commit to it.
    ///
    /// The returned commitment digest is the only part safe to disclose
    /// before the counterparty answers.
    pub fn begin<E: EntropySource>(entropy: &mut E, max: u64) -> Result<Self, EntropyError> {
        let secret = entropy.uniform(max)?;
        let key = entropy.generate_key()?;
        let commitment = Commitment::new(&key, secret);
        Ok(Self {
            secret,
            key,
            commitment,
            max,
        })
    }

    /// The digest binding the hidden value
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Upper bound of the committed range (inclusive)
    pub fn max_value(&self) -> u64 {
        self.max
    }

    /// Combine with the counterparty's answer and reveal.
    ///
    /// Computes `(secret + user_value) mod (max + 1)`; because the secret is
    /// uniform over the range, the result is uniform no matter how the
    /// counterparty chose `user_value`. Consumes the commitment: an opened
    /// decision is terminal.
    pub fn open(self, user_value: u64) -> FairOutcome {
        let modulus = self.max + 1;
        FairOutcome {
            result: (self.secret + user_value % modulus) % modulus,
            secret: self.secret,
            key: self.key,
            commitment: self.commitment,
        }
    }
}

/// An opened commitment: value and key are public, result is computed
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FairOutcome {
    /// `(secret + user_value) mod (max + 1)`
    pub result: u64,
    /// The formerly hidden value
    pub secret: u64,
    /// The key the digest was computed under
    pub key: CommitKey,
    /// The digest disclosed before the counterparty answered
    pub commitment: Commitment,
}

impl FairOutcome {
    /// Recompute the digest from the revealed key and value.
    ///
    /// This is the counterparty's cheat check: a mismatch means the secret
    /// was changed after the digest was shown.
    pub fn verify(&self) -> bool {
        self.commitment.verify(&self.key, self.secret)
    }
}
