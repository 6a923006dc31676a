//! Error types for Landtrack Core
//!
//! Errors only arise at the collaborator boundary:
//! - Snapshot fetching (missing entities, unavailable store)
//! - Bundle decoding
//! - Configuration loading
//!
//! The progress engine itself never fails.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

/// Kind of entity a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Lot snapshot
    Lot,
    /// Plan
    Plan,
    /// Project
    Project,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lot => "lot",
            Self::Plan => "plan",
            Self::Project => "project",
        })
    }
}

/// Main engine service error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// No snapshot for the requested id
    #[error("{kind} {id} not found")]
    SnapshotNotFound {
        /// Entity looked up
        kind: EntityKind,
        /// Raw id
        id: u64,
    },

    /// Snapshot store could not be reached
    #[error("snapshot source unavailable: {0}")]
    SourceUnavailable(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bundle or payload could not be decoded
    #[error("decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// File access failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Lot lookup miss
    #[inline]
    #[must_use]
    pub fn lot_not_found(id: impl Into<u64>) -> Self {
        Self::SnapshotNotFound {
            kind: EntityKind::Lot,
            id: id.into(),
        }
    }

    /// Plan lookup miss
    #[inline]
    #[must_use]
    pub fn plan_not_found(id: impl Into<u64>) -> Self {
        Self::SnapshotNotFound {
            kind: EntityKind::Plan,
            id: id.into(),
        }
    }

    /// Project lookup miss
    #[inline]
    #[must_use]
    pub fn project_not_found(id: impl Into<u64>) -> Self {
        Self::SnapshotNotFound {
            kind: EntityKind::Project,
            id: id.into(),
        }
    }

    /// Check if the lookup target does not exist
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SnapshotNotFound { .. })
    }

    /// Check if error is retryable
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SourceUnavailable(_) | Self::Io(_))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML did not parse
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file could not be read
    #[error("cannot read {path}: {source}")]
    Read {
        /// File
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// Creation weight above 100 percent
    #[error("creation weight must be at most 100, got {0}")]
    CreationWeightOutOfRange(u8),

    /// Fetch concurrency of zero
    #[error("fetch concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Result type for service operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use landtrack_snapshot::LotId;

    #[test]
    fn not_found_message() {
        let err = EngineError::lot_not_found(LotId::new(42));
        assert_eq!(err.to_string(), "lot 42 not found");
        assert!(err.is_not_found());
        assert!(!err.is_retryable());
    }

    #[test]
    fn unavailable_is_retryable() {
        assert!(EngineError::SourceUnavailable("timeout".into()).is_retryable());
    }

    #[test]
    fn config_error_converts() {
        let err: EngineError = ConfigError::ZeroConcurrency.into();
        assert!(matches!(err, EngineError::Config(ConfigError::ZeroConcurrency)));
    }
}
