//! Cryptographic primitives for the fair dice protocol.
//!
//! This module provides:
//! - CommitKey and Commitment for the HMAC commit-reveal scheme
//! - EntropySource and its system/mock implementations

mod commitment;
mod entropy;

pub use commitment::{CommitKey, Commitment};
pub use entropy::{EntropyError, EntropySource, MockEntropy, SystemEntropy};
