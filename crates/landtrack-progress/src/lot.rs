//! Lot progress calculator
//!
//! Folds the four section results of a lot into one progress record.

use crate::evaluator::SectionEvaluator;
use crate::narrative;
use crate::phase::{LotPhase, PhaseInput, PhaseNaming, PhaseResolver};
use crate::rules::CompensationAggregates;
use crate::section::{Section, SectionResult};
use chrono::NaiveDate;
use landtrack_snapshot::{LotId, LotSnapshot, PlanId};
use serde::{Deserialize, Serialize};

/// Roll-up counters attached to a lot's progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotAggregates {
    /// Compensation record counters
    pub compensation: CompensationAggregates,
}

/// Progress of one lot, computed from one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotProgress {
    /// Lot
    pub lot_id: LotId,
    /// Owning plan
    pub plan_id: PlanId,
    /// Lot number as printed on the plan
    #[serde(default)]
    pub lot_number: String,
    /// Linked owners
    #[serde(default)]
    pub total_owners: usize,
    /// Weighted completion, 0-100
    pub overall_percent: u8,
    /// Displayed phase
    pub status: LotPhase,
    /// Human-readable hint for the first incomplete section
    pub status_message: String,
    /// Last section of the complete prefix
    pub last_completed_section: Option<Section>,
    /// First section that is not complete
    pub stopped_at: Option<Section>,
    /// Section results in workflow order
    pub sections: Vec<SectionResult>,
    /// Roll-up counters
    #[serde(default)]
    pub aggregates: LotAggregates,
    /// Latest dated activity in the snapshot
    #[serde(default)]
    pub last_activity: Option<NaiveDate>,
}

impl LotProgress {
    /// Every section complete
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == LotPhase::Completed
    }

    /// Result for a section
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&SectionResult> {
        self.sections.iter().find(|r| r.section == section)
    }

    /// Input for phase resolution
    #[inline]
    #[must_use]
    pub fn phase_input(&self) -> PhaseInput {
        PhaseInput::new(self.overall_percent, self.last_completed_section)
    }
}

/// Computes [`LotProgress`] from snapshots
#[derive(Debug, Default)]
pub struct LotProgressCalculator {
    evaluator: SectionEvaluator,
    resolver: PhaseResolver,
}

impl LotProgressCalculator {
    /// Calculator with the default phase naming
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator with an explicit phase naming
    #[inline]
    #[must_use]
    pub fn with_naming(naming: PhaseNaming) -> Self {
        Self {
            evaluator: SectionEvaluator::new(),
            resolver: PhaseResolver::new(naming),
        }
    }

    /// Phase resolver in use
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &PhaseResolver {
        &self.resolver
    }

    /// Compute a lot's progress
    ///
    /// Pure: identical snapshots give identical records.
    #[must_use]
    pub fn compute(&self, snapshot: &LotSnapshot) -> LotProgress {
        let sections = self.evaluator.evaluate_all(snapshot);

        let overall_percent = overall_percent(&sections);
        let last_completed_section = sections
            .iter()
            .take_while(|r| r.is_complete())
            .last()
            .map(|r| r.section);
        let stopped_at = sections.iter().find(|r| !r.is_complete()).map(|r| r.section);

        let (status, strategy) = self
            .resolver
            .resolve_with_strategy(&PhaseInput::new(overall_percent, last_completed_section));

        tracing::trace!(
            lot_id = %snapshot.lot_id,
            overall_percent,
            status = %status,
            strategy,
            "computed lot progress"
        );

        LotProgress {
            lot_id: snapshot.lot_id,
            plan_id: snapshot.plan_id,
            lot_number: snapshot.lot_number.clone(),
            total_owners: snapshot.owner_count(),
            overall_percent,
            status,
            status_message: narrative::status_message(&sections),
            last_completed_section,
            stopped_at,
            sections: sections.to_vec(),
            aggregates: LotAggregates {
                compensation: CompensationAggregates::from_records(&snapshot.compensations),
            },
            last_activity: snapshot.last_activity(),
        }
    }
}

/// Compute a lot's progress with the default phase naming
#[must_use]
pub fn compute_lot_progress(snapshot: &LotSnapshot) -> LotProgress {
    LotProgressCalculator::new().compute(snapshot)
}

/// Weighted sum of section completeness, rounded and clamped to 0-100
///
/// 100 is reserved for lots whose four sections are all complete; a
/// near-complete compensation section can round up to it otherwise.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn overall_percent(sections: &[SectionResult]) -> u8 {
    let points: f64 = sections.iter().map(SectionResult::weighted_points).sum();
    let rounded = if points.is_finite() {
        points.round().clamp(0.0, 100.0) as u8
    } else {
        0
    };
    if sections.iter().all(SectionResult::is_complete) {
        rounded
    } else {
        rounded.min(99)
    }
}
