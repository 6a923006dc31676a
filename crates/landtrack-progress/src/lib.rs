//! Landtrack Progress Engine
//!
//! Computes acquisition progress for lots and rolls it up to plans and
//! projects. Every entry point is a pure function of its input: no I/O,
//! no shared state, and no failure path. Incomplete or dirty data always
//! produces a valid record.
//!
//! # Core Concepts
//!
//! - [`SectionEvaluator`]: Scores the four workflow sections of a lot, with blocking
//! - [`LotProgressCalculator`]: Weighted lot percentage, stop point and phase
//! - [`PhaseResolver`]: Names a lot's phase from explicit data or percentage bands
//! - [`aggregate_plan`] / [`aggregate_project`]: Unweighted means, rounded per level
//! - [`format_message`] / [`next_action`]: Narrative for humans
//! - [`PhaseDistribution`]: Lots per phase for charts
//!
//! # Example
//!
//! ```rust
//! use landtrack_progress::{compute_lot_progress, format_message, LotPhase};
//! use landtrack_snapshot::{LotId, LotSnapshot, OwnerId, OwnerLink, PlanId};
//!
//! let snapshot = LotSnapshot::new(LotId::new(7), PlanId::new(2))
//!     .with_owner(OwnerLink::new(OwnerId::new(1), 100.0));
//!
//! let progress = compute_lot_progress(&snapshot);
//! assert_eq!(progress.overall_percent, 25);
//! assert_eq!(progress.status, LotPhase::LandDetails);
//! assert_eq!(format_message(&progress), "25% complete — Complete Land Details");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod aggregate;
mod distribution;
mod evaluator;
mod lot;
mod narrative;
mod phase;
mod rules;
mod section;

// Re-exports
pub use aggregate::{
    aggregate_plan, aggregate_plan_with_header, aggregate_project, aggregate_project_with_header,
    plan_creation_score, project_creation_score, AggregateStatus, AggregationPolicy, PlanProgress,
    ProjectProgress,
};
pub use distribution::PhaseDistribution;
pub use evaluator::{evaluate, SectionEvaluator};
pub use lot::{compute_lot_progress, overall_percent, LotAggregates, LotProgress, LotProgressCalculator};
pub use narrative::{
    format_message, next_action, status_message, ALL_DONE, ALL_SECTIONS_COMPLETE, CELEBRATION,
    COMPLETE_PREREQUISITES, READY_TO_START,
};
pub use phase::{
    LastCompletedStrategy, LotPhase, ParsePhaseError, PercentThresholdStrategy, PhaseInput, PhaseNaming,
    PhaseResolver, PhaseStrategy,
};
pub use rules::{
    Assessment, CompensationAggregates, CompensationChecks, CompensationRule, LandRule, OwnerRule,
    SectionRule, ValuationRule,
};
pub use section::{ParseSectionError, Section, SectionResult, SectionStatus, SECTION_WEIGHT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
