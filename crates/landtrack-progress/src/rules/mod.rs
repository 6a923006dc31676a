//! Per-section completeness rules
//!
//! Each rule looks only at its own section's data. Cross-section blocking
//! is applied by the [`SectionEvaluator`](crate::SectionEvaluator), never
//! inside a rule.

mod compensation;
mod land;
mod owner;
mod valuation;

pub use compensation::{CompensationAggregates, CompensationChecks, CompensationRule};
pub use land::LandRule;
pub use owner::OwnerRule;
pub use valuation::ValuationRule;

use crate::section::Section;
use landtrack_snapshot::LotSnapshot;

/// Completeness rule for one workflow section
///
/// Rules must be pure: the same snapshot always yields the same assessment.
pub trait SectionRule: Send + Sync + std::fmt::Debug {
    /// Section this rule scores
    fn section(&self) -> Section;

    /// Score the section's own data
    fn assess(&self, snapshot: &LotSnapshot) -> Assessment;
}

/// Raw score of a section before blocking is applied
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Fraction of criteria met
    pub completeness: f64,

    /// Unmet criteria, most actionable first
    pub missing: Vec<String>,
}

impl Assessment {
    /// Every criterion met
    #[inline]
    #[must_use]
    pub fn complete() -> Self {
        Self {
            completeness: 1.0,
            missing: Vec::new(),
        }
    }

    /// Nothing recorded yet
    #[inline]
    #[must_use]
    pub fn not_started(missing: &[&str]) -> Self {
        Self {
            completeness: 0.0,
            missing: missing.iter().map(|m| (*m).to_string()).collect(),
        }
    }

    /// Score from a list of (criterion met, label) checks
    #[must_use]
    pub fn from_checks(checks: &[(bool, &str)]) -> Self {
        let credits: Vec<(f64, &str)> = checks
            .iter()
            .map(|(ok, label)| (if *ok { 1.0 } else { 0.0 }, *label))
            .collect();
        Self::from_credits(&credits)
    }

    /// Score from (credit in `[0, 1]`, label) pairs
    ///
    /// A criterion is listed as missing unless its credit is full.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_credits(credits: &[(f64, &str)]) -> Self {
        if credits.is_empty() {
            return Self::complete();
        }
        let earned: f64 = credits.iter().map(|(c, _)| c.clamp(0.0, 1.0)).sum();
        Self {
            completeness: earned / credits.len() as f64,
            missing: credits
                .iter()
                .filter(|(c, _)| *c < 1.0)
                .map(|(_, label)| (*label).to_string())
                .collect(),
        }
    }
}
