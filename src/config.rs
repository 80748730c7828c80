//! List configuration (§6).

use std::sync::Arc;

use crate::comparator::{Comparator, LexicographicComparator, SharedComparator};
use crate::error::ConfigError;
use crate::finder::MAX_LEVEL_CAP;
use crate::level::{DEFAULT_MAX_LEVEL, DEFAULT_P};

/// Configuration for a [`crate::SkipSet`]: the comparator, the level ceiling, and the geometric
/// parameter for random level generation.
///
/// Construct one with [`SkipSetConfig::builder`], or use [`SkipSetConfig::default`] for the
/// documented defaults (lexicographic comparator, `max_level = 16`, `p = 0.5`).
#[derive(Clone)]
pub struct SkipSetConfig {
    pub(crate) comparator: SharedComparator,
    pub(crate) max_level: usize,
    pub(crate) p: f64,
}

impl std::fmt::Debug for SkipSetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkipSetConfig")
            .field("max_level", &self.max_level)
            .field("p", &self.p)
            .finish_non_exhaustive()
    }
}

impl Default for SkipSetConfig {
    fn default() -> Self {
        Self {
            comparator: Arc::new(LexicographicComparator),
            max_level: DEFAULT_MAX_LEVEL,
            p: DEFAULT_P,
        }
    }
}

impl SkipSetConfig {
    /// Starts building a configuration from the documented defaults.
    #[must_use]
    pub fn builder() -> SkipSetConfigBuilder {
        SkipSetConfigBuilder {
            config: Self::default(),
        }
    }

    /// Validates this configuration, as performed by [`crate::SkipSet::new`].
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.max_level == 0 {
            return Err(ConfigError::MaxLevelZero);
        }
        if self.max_level > MAX_LEVEL_CAP {
            return Err(ConfigError::MaxLevelTooLarge(self.max_level));
        }
        if !(self.p > 0.0 && self.p < 1.0) {
            return Err(ConfigError::InvalidP(self.p));
        }
        Ok(())
    }
}

/// Fluent builder for [`SkipSetConfig`].
#[derive(Clone)]
pub struct SkipSetConfigBuilder {
    config: SkipSetConfig,
}

impl std::fmt::Debug for SkipSetConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SkipSetConfigBuilder").field(&self.config).finish()
    }
}

impl SkipSetConfigBuilder {
    /// Overrides the comparator (default: [`LexicographicComparator`]).
    #[must_use]
    pub fn comparator<C: Comparator + 'static>(mut self, comparator: C) -> Self {
        self.config.comparator = Arc::new(comparator);
        self
    }

    /// Overrides the level ceiling (default: 16). Must lie in `1..=32`.
    #[must_use]
    pub fn max_level(mut self, max_level: usize) -> Self {
        self.config.max_level = max_level;
        self
    }

    /// Overrides the geometric parameter (default: 0.5). Must lie in the open interval `(0, 1)`.
    #[must_use]
    pub fn p(mut self, p: f64) -> Self {
        self.config.p = p;
        self
    }

    /// Finishes the configuration without validating it; validation happens in
    /// [`crate::SkipSet::new`].
    #[must_use]
    pub fn build(self) -> SkipSetConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(SkipSetConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_max_level() {
        let config = SkipSetConfig::builder().max_level(0).build();
        assert_eq!(config.validate(), Err(ConfigError::MaxLevelZero));
    }

    #[test]
    fn rejects_max_level_above_cap() {
        let config = SkipSetConfig::builder().max_level(MAX_LEVEL_CAP + 1).build();
        assert_eq!(
            config.validate(),
            Err(ConfigError::MaxLevelTooLarge(MAX_LEVEL_CAP + 1))
        );
    }

    #[test]
    fn rejects_p_outside_open_interval() {
        assert!(SkipSetConfig::builder().p(0.0).build().validate().is_err());
        assert!(SkipSetConfig::builder().p(1.0).build().validate().is_err());
        assert!(SkipSetConfig::builder().p(-0.5).build().validate().is_err());
        assert!(SkipSetConfig::builder().p(0.5).build().validate().is_ok());
    }

    #[test]
    fn max_level_one_is_valid() {
        let config = SkipSetConfig::builder().max_level(1).build();
        assert!(config.validate().is_ok());
    }
}
