//! Fairdice Core Library
//!
//! This crate provides the provably-fair dice game engine: the HMAC
//! commit-reveal scheme, unbiased secure randomness, non-transitive dice
//! parsing, the win-probability table, and the interactive game session.

pub mod crypto;
pub mod dice;
pub mod fairness;
pub mod game;
pub mod probability;

pub use crypto::{CommitKey, Commitment, EntropyError, EntropySource, MockEntropy, SystemEntropy};
pub use dice::{parse_dice, ConfigError, Die};
pub use fairness::{FairCommit, FairOutcome};
pub use game::{GameError, GameReport, GameSession, Player, RollResult, Selection, SessionEnd};
pub use probability::{tie_probability, win_probability, ProbabilityTable};
