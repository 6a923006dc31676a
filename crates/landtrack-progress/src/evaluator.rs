//! Section evaluator
//!
//! Runs the per-section rules in workflow order and applies the blocking
//! chain Owner -> Land -> Valuation -> Compensation.

use crate::rules::{CompensationRule, LandRule, OwnerRule, SectionRule, ValuationRule};
use crate::section::{Section, SectionResult};
use landtrack_snapshot::LotSnapshot;

/// Evaluates workflow sections of a lot
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionEvaluator {
    owner: OwnerRule,
    land: LandRule,
    valuation: ValuationRule,
    compensation: CompensationRule,
}

impl SectionEvaluator {
    /// Create evaluator with the built-in rules
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule scoring a section
    #[must_use]
    pub fn rule(&self, section: Section) -> &dyn SectionRule {
        match section {
            Section::OwnerDetails => &self.owner,
            Section::LandDetails => &self.land,
            Section::Valuation => &self.valuation,
            Section::Compensation => &self.compensation,
        }
    }

    /// Evaluate all four sections in workflow order
    ///
    /// A section whose prerequisite is not exactly complete is blocked,
    /// whatever its own data says.
    #[must_use]
    pub fn evaluate_all(&self, snapshot: &LotSnapshot) -> [SectionResult; 4] {
        let owner = self.score(Section::OwnerDetails, snapshot, None);
        let land = self.score(Section::LandDetails, snapshot, Some(&owner));
        let valuation = self.score(Section::Valuation, snapshot, Some(&land));
        let compensation = self.score(Section::Compensation, snapshot, Some(&valuation));
        [owner, land, valuation, compensation]
    }

    fn score(
        &self,
        section: Section,
        snapshot: &LotSnapshot,
        prerequisite: Option<&SectionResult>,
    ) -> SectionResult {
        if let Some(prev) = prerequisite.filter(|p| !p.is_complete()) {
            return SectionResult::blocked(section, prev.section);
        }
        let assessment = self.rule(section).assess(snapshot);
        SectionResult::scored(section, assessment.completeness, assessment.missing)
    }

    /// Evaluate a single section, including its blocking prerequisites
    #[must_use]
    pub fn evaluate(&self, section: Section, snapshot: &LotSnapshot) -> SectionResult {
        let [owner, land, valuation, compensation] = self.evaluate_all(snapshot);
        match section {
            Section::OwnerDetails => owner,
            Section::LandDetails => land,
            Section::Valuation => valuation,
            Section::Compensation => compensation,
        }
    }
}

/// Evaluate one section of a lot with the built-in rules
#[must_use]
pub fn evaluate(section: Section, snapshot: &LotSnapshot) -> SectionResult {
    SectionEvaluator::new().evaluate(section, snapshot)
}
