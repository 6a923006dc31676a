//! Landtrack Core
//!
//! Service layer around the progress engine: snapshot sources, lot
//! filtering, configuration and the async [`ProgressService`].
//!
//! # Architecture
//!
//! ```text
//! SnapshotSource ──fetch──► ProgressService ──► landtrack-progress (pure)
//!      ▲                         │
//!  InMemorySource           LotFilter / EngineConfig
//! ```
//!
//! # Example
//!
//! ```rust
//! use landtrack_core::prelude::*;
//! use landtrack_snapshot::{LotId, LotSnapshot, OwnerId, OwnerLink, PlanId};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), EngineError> {
//! let source = InMemorySource::new();
//! source.insert_lot(
//!     LotSnapshot::new(LotId::new(1), PlanId::new(1))
//!         .with_owner(OwnerLink::new(OwnerId::new(1), 100.0)),
//! );
//!
//! let service = ProgressService::new(source);
//! let plan = service.plan_progress(PlanId::new(1)).await?;
//! assert_eq!(plan.progress, 25);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod filter;
pub mod service;
pub mod source;

// Re-exports
pub use config::{EngineConfig, DEFAULT_FETCH_CONCURRENCY};
pub use error::{ConfigError, EngineError, EntityKind, Result};
pub use filter::LotFilter;
pub use service::{PlanReport, ProgressService, ProjectReport};
pub use source::{Bundle, InMemorySource, PlanEntry, SnapshotSource};

/// Prelude for common imports
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::error::{ConfigError, EngineError};
    pub use crate::filter::LotFilter;
    pub use crate::service::{PlanReport, ProgressService, ProjectReport};
    pub use crate::source::{InMemorySource, SnapshotSource};
    pub use landtrack_progress::{
        format_message, next_action, AggregateStatus, LotPhase, LotProgress, PhaseNaming,
        PlanProgress, ProjectProgress,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
