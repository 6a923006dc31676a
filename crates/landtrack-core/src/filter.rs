//! Lot filtering ahead of aggregation
//!
//! The aggregator folds whatever it is handed. Sub-setting by phase,
//! progress band or activity window happens here, before the fold.

use chrono::NaiveDate;
use landtrack_progress::{LotPhase, LotProgress};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Criteria a lot must meet to take part in an aggregate
///
/// An empty filter keeps every lot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotFilter {
    /// Allowed phases; empty allows all
    pub phases: BTreeSet<LotPhase>,
    /// Lowest overall percentage kept
    pub min_percent: Option<u8>,
    /// Highest overall percentage kept
    pub max_percent: Option<u8>,
    /// Earliest last activity kept
    pub active_from: Option<NaiveDate>,
    /// Latest last activity kept
    pub active_to: Option<NaiveDate>,
}

impl LotFilter {
    /// Create filter keeping every lot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also allow a phase
    #[inline]
    #[must_use]
    pub fn with_phase(mut self, phase: LotPhase) -> Self {
        self.phases.insert(phase);
        self
    }

    /// With allowed phases
    #[must_use]
    pub fn with_phases(mut self, phases: impl IntoIterator<Item = LotPhase>) -> Self {
        self.phases.extend(phases);
        self
    }

    /// With inclusive percentage bounds
    #[inline]
    #[must_use]
    pub fn with_percent_range(mut self, min: Option<u8>, max: Option<u8>) -> Self {
        self.min_percent = min;
        self.max_percent = max;
        self
    }

    /// With inclusive last-activity window
    #[inline]
    #[must_use]
    pub fn with_activity_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.active_from = from;
        self.active_to = to;
        self
    }

    /// Filter keeps every lot
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Lot meets every criterion
    ///
    /// Once a date bound is set, lots with no dated activity are dropped.
    #[must_use]
    pub fn matches(&self, lot: &LotProgress) -> bool {
        if !self.phases.is_empty() && !self.phases.contains(&lot.status) {
            return false;
        }
        if self.min_percent.is_some_and(|min| lot.overall_percent < min)
            || self.max_percent.is_some_and(|max| lot.overall_percent > max)
        {
            return false;
        }
        if self.active_from.is_none() && self.active_to.is_none() {
            return true;
        }
        lot.last_activity.is_some_and(|day| {
            self.active_from.map_or(true, |from| day >= from)
                && self.active_to.map_or(true, |to| day <= to)
        })
    }

    /// Keep matching lots, preserving order
    #[must_use]
    pub fn apply(&self, lots: Vec<LotProgress>) -> Vec<LotProgress> {
        if self.is_empty() {
            return lots;
        }
        lots.into_iter().filter(|lot| self.matches(lot)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landtrack_progress::compute_lot_progress;
    use landtrack_test_utils::{completed_lot, date, empty_lot, owner_only_lot};

    fn lots() -> Vec<LotProgress> {
        vec![
            compute_lot_progress(&empty_lot(1, 1)),
            compute_lot_progress(&owner_only_lot(2, 1)),
            compute_lot_progress(&completed_lot(3, 1)),
        ]
    }

    fn ids(lots: &[LotProgress]) -> Vec<u64> {
        lots.iter().map(|l| l.lot_id.get()).collect()
    }

    #[test]
    fn empty_filter_keeps_all() {
        assert!(LotFilter::new().is_empty());
        assert_eq!(LotFilter::new().apply(lots()).len(), 3);
    }

    #[test]
    fn by_phase() {
        let kept = LotFilter::new()
            .with_phases([LotPhase::LandDetails, LotPhase::Completed])
            .apply(lots());
        assert_eq!(ids(&kept), vec![2, 3]);
    }

    #[test]
    fn by_percent_band() {
        let kept = LotFilter::new()
            .with_percent_range(Some(1), Some(99))
            .apply(lots());
        assert_eq!(ids(&kept), vec![2]);
    }

    #[test]
    fn by_activity_window_drops_undated() {
        let kept = LotFilter::new()
            .with_activity_between(Some(date(2024, 1, 1)), Some(date(2024, 12, 31)))
            .apply(lots());
        assert_eq!(ids(&kept), vec![3]);

        let kept = LotFilter::new()
            .with_activity_between(None, Some(date(2023, 12, 31)))
            .apply(lots());
        assert!(kept.is_empty());
    }
}
