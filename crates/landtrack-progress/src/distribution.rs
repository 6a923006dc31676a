//! Lots per phase, for chart collaborators

use crate::lot::LotProgress;
use crate::phase::{LotPhase, PhaseInput, PhaseResolver};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of lots in each phase
///
/// Every phase is present, including empty ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhaseDistribution {
    counts: BTreeMap<LotPhase, usize>,
}

impl Default for PhaseDistribution {
    fn default() -> Self {
        Self {
            counts: LotPhase::ALL.iter().map(|p| (*p, 0)).collect(),
        }
    }
}

impl PhaseDistribution {
    /// Count lots by their computed status
    #[must_use]
    pub fn from_lots(lots: &[LotProgress]) -> Self {
        lots.iter().map(|l| l.status).collect()
    }

    /// Count phase inputs through a resolver
    ///
    /// Used when only percentages are known, e.g. rows read back from a cache.
    #[must_use]
    pub fn from_inputs(inputs: &[PhaseInput], resolver: &PhaseResolver) -> Self {
        inputs.iter().map(|i| resolver.resolve(i)).collect()
    }

    /// Lots in a phase
    #[inline]
    #[must_use]
    pub fn count(&self, phase: LotPhase) -> usize {
        self.counts.get(&phase).copied().unwrap_or(0)
    }

    /// Lots counted
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// (phase, count) pairs in workflow order
    pub fn iter(&self) -> impl Iterator<Item = (LotPhase, usize)> + '_ {
        self.counts.iter().map(|(p, c)| (*p, *c))
    }

    fn record(&mut self, phase: LotPhase) {
        *self.counts.entry(phase).or_insert(0) += 1;
    }
}

impl FromIterator<LotPhase> for PhaseDistribution {
    fn from_iter<I: IntoIterator<Item = LotPhase>>(iter: I) -> Self {
        let mut distribution = Self::default();
        for phase in iter {
            distribution.record(phase);
        }
        distribution
    }
}
