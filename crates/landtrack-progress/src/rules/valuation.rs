//! Valuation rule
//!
//! The six monetary components are not checked against the recorded total.
//! Only a positive recorded total satisfies the amounts criterion; components
//! without a total earn half of it.

use super::{Assessment, SectionRule};
use crate::section::Section;
use landtrack_snapshot::LotSnapshot;

/// Amounts, assessment date and a final review status
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationRule;

impl ValuationRule {
    /// Label when no valuation exists
    pub const MISSING_RECORD: &'static str = "valuation record";
    /// Label when no amount is recorded
    pub const MISSING_TOTAL: &'static str = "total value";
    /// Label when the assessment date is blank
    pub const MISSING_DATE: &'static str = "assessment date";
    /// Label when the valuation is not yet approved
    pub const MISSING_APPROVAL: &'static str = "valuation approval";

    /// Amounts credit for a record with components but no total
    pub const COMPONENTS_ONLY_CREDIT: f64 = 0.5;
}

impl SectionRule for ValuationRule {
    fn section(&self) -> Section {
        Section::Valuation
    }

    fn assess(&self, snapshot: &LotSnapshot) -> Assessment {
        let Some(valuation) = snapshot.valuation.as_ref() else {
            return Assessment::not_started(&[Self::MISSING_RECORD]);
        };

        let amounts = if valuation.total_value.is_positive() {
            1.0
        } else if valuation.populated_components() > 0 {
            Self::COMPONENTS_ONLY_CREDIT
        } else {
            0.0
        };

        Assessment::from_credits(&[
            (amounts, Self::MISSING_TOTAL),
            (flag(valuation.assessment_date.is_some()), Self::MISSING_DATE),
            (flag(valuation.status.is_final()), Self::MISSING_APPROVAL),
        ])
    }
}

fn flag(met: bool) -> f64 {
    if met {
        1.0
    } else {
        0.0
    }
}
