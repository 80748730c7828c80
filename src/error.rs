//! Error types.
//!
//! The only fallible entry point in this crate is [`crate::SkipSet::new`]: once a list is built,
//! `add`/`contains`/`remove` report everything through a plain `bool` (§7).

use thiserror::Error;

/// Why a [`crate::SkipSetConfig`] was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_level` was zero.
    #[error("max_level must be at least 1, got 0")]
    MaxLevelZero,

    /// `max_level` exceeded the compile-time cap on stack-resident predecessor/successor arrays.
    #[error("max_level {0} exceeds the supported maximum of {max}", max = crate::finder::MAX_LEVEL_CAP)]
    MaxLevelTooLarge(usize),

    /// `p` was not in the open interval `(0, 1)`.
    #[error("p must lie in (0, 1), got {0}")]
    InvalidP(f64),
}
