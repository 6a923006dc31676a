//! Landtrack Snapshot Model
//!
//! Read-only, point-in-time bundles of a lot's acquisition records.
//!
//! # Core Concepts
//!
//! - [`LotSnapshot`]: One lot with its owners, land details, valuation and compensation
//! - [`Amount`]: Monetary value with lenient, never-failing parsing
//! - [`PlanHeader`] / [`ProjectHeader`]: Registration fields used by creation-weighted roll-ups
//!
//! # Example
//!
//! ```rust
//! use landtrack_snapshot::{LotId, LotSnapshot, OwnerId, OwnerLink, PlanId};
//!
//! let snapshot = LotSnapshot::new(LotId::new(1), PlanId::new(1))
//!     .with_owner(OwnerLink::new(OwnerId::new(7), 100.0));
//! assert_eq!(snapshot.owner_count(), 1);
//! ```

#![warn(unreachable_pub)]

mod amount;
mod header;
mod ids;
mod lot;
mod records;

pub use amount::{lenient, parse_date_lenient, Amount};
pub use header::{is_filled, PlanHeader, ProjectHeader};
pub use ids::{LotId, OwnerId, PlanId, ProjectId};
pub use lot::LotSnapshot;
pub use records::{
    CompensationRecord, Extent, LandDetailRecord, OwnerLink, ValuationRecord, ValuationStatus,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
