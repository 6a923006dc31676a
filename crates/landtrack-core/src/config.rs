//! Engine configuration
//!
//! Loaded from TOML; every field is optional and falls back to defaults.
//!
//! ```toml
//! phase_naming = "next_step"
//! fetch_concurrency = 8
//!
//! [aggregation]
//! creation_weight_percent = 10
//! ```

use crate::error::ConfigError;
use landtrack_progress::{AggregationPolicy, LotProgressCalculator, PhaseNaming, PhaseResolver};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of lot snapshots fetched at once
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How lot phases are named
    pub phase_naming: PhaseNaming,
    /// Plan/project roll-up policy
    pub aggregation: AggregationPolicy,
    /// Lot snapshots fetched concurrently per plan
    pub fetch_concurrency: usize,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With phase naming
    #[inline]
    #[must_use]
    pub fn with_phase_naming(mut self, naming: PhaseNaming) -> Self {
        self.phase_naming = naming;
        self
    }

    /// With aggregation policy
    #[inline]
    #[must_use]
    pub fn with_aggregation(mut self, policy: AggregationPolicy) -> Self {
        self.aggregation = policy;
        self
    }

    /// With creation weight, in percent
    #[inline]
    #[must_use]
    pub fn with_creation_weight(mut self, percent: u8) -> Self {
        self.aggregation = AggregationPolicy::with_creation_weight(percent);
        self
    }

    /// With fetch concurrency
    #[inline]
    #[must_use]
    pub fn with_fetch_concurrency(mut self, concurrency: usize) -> Self {
        self.fetch_concurrency = concurrency;
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a creation weight above 100 or a zero
    /// fetch concurrency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.aggregation.creation_weight_percent > 100 {
            return Err(ConfigError::CreationWeightOutOfRange(
                self.aggregation.creation_weight_percent,
            ));
        }
        if self.fetch_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the TOML is malformed or out of range.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or is invalid.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Lot calculator honoring the phase naming
    #[must_use]
    pub fn calculator(&self) -> LotProgressCalculator {
        LotProgressCalculator::with_naming(self.phase_naming)
    }

    /// Phase resolver honoring the phase naming
    #[must_use]
    pub fn resolver(&self) -> PhaseResolver {
        PhaseResolver::new(self.phase_naming)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            phase_naming: PhaseNaming::default(),
            aggregation: AggregationPolicy::default(),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }
}
