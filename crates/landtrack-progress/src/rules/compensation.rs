//! Compensation rule
//!
//! Compensation is scored per linked owner against four checks and rolled
//! up across owners. The completeness fraction is the share of checks met
//! over all owners (`true checks / (4 * owners)`), so a lot with one owner
//! whose amount is set and balance settled, but whose interest and
//! division date are outstanding, scores 0.5.

use super::{Assessment, SectionRule};
use crate::section::Section;
use landtrack_snapshot::{CompensationRecord, LotSnapshot};
use serde::{Deserialize, Serialize};

/// Per-owner compensation checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationChecks {
    /// Final compensation amount is positive
    pub has_amount: bool,
    /// Balance due is zero
    pub balance_settled: bool,
    /// Interest paid covers interest due
    pub interest_reconciled: bool,
    /// Account-division date recorded
    pub has_division_date: bool,
}

impl CompensationChecks {
    /// Labels in the order checks are reported
    pub const LABELS: [&'static str; 4] = [
        "compensation amount",
        "balance due",
        "interest reconciliation",
        "account division date",
    ];

    /// Checks for one record
    #[must_use]
    pub fn of(record: &CompensationRecord) -> Self {
        Self {
            has_amount: record.has_amount(),
            balance_settled: record.balance_settled(),
            interest_reconciled: record.interest_reconciled(),
            has_division_date: record.has_division_date(),
        }
    }

    /// Checks in reporting order
    #[inline]
    #[must_use]
    pub fn as_array(self) -> [bool; 4] {
        [
            self.has_amount,
            self.balance_settled,
            self.interest_reconciled,
            self.has_division_date,
        ]
    }

    /// Number of checks met
    #[inline]
    #[must_use]
    pub fn met(self) -> usize {
        self.as_array().iter().filter(|ok| **ok).count()
    }

    /// All four checks met
    #[inline]
    #[must_use]
    pub fn fully_complete(self) -> bool {
        self.met() == 4
    }
}

/// Roll-up counters over a lot's compensation records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationAggregates {
    /// Records present
    pub total_records: usize,
    /// Records with a positive amount
    pub with_amount: usize,
    /// Records with nothing left to pay
    pub with_zero_balance: usize,
    /// Records with interest reconciled
    pub with_interest_complete: usize,
    /// Records with a division date
    pub with_division_date: usize,
    /// Records meeting all four checks
    pub fully_complete: usize,
}

impl CompensationAggregates {
    /// Count over every record in the snapshot
    #[must_use]
    pub fn from_records(records: &[CompensationRecord]) -> Self {
        records
            .iter()
            .map(CompensationChecks::of)
            .fold(Self::default(), |mut acc, checks| {
                acc.total_records += 1;
                acc.with_amount += usize::from(checks.has_amount);
                acc.with_zero_balance += usize::from(checks.balance_settled);
                acc.with_interest_complete += usize::from(checks.interest_reconciled);
                acc.with_division_date += usize::from(checks.has_division_date);
                acc.fully_complete += usize::from(checks.fully_complete());
                acc
            })
    }
}

/// Compensation settled for every linked owner
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensationRule;

impl CompensationRule {
    /// Label when no owners are linked
    pub const MISSING_OWNERS: &'static str = "owner assignment";
    /// Label when no compensation records exist
    pub const MISSING_RECORDS: &'static str = "compensation records";

    /// Checks per linked owner; an owner without a record fails all four
    #[must_use]
    pub fn owner_checks(snapshot: &LotSnapshot) -> Vec<CompensationChecks> {
        snapshot
            .owners
            .iter()
            .map(|link| {
                snapshot
                    .compensation_for(link.owner_id)
                    .map(CompensationChecks::of)
                    .unwrap_or_default()
            })
            .collect()
    }
}

impl SectionRule for CompensationRule {
    fn section(&self) -> Section {
        Section::Compensation
    }

    #[allow(clippy::cast_precision_loss)]
    fn assess(&self, snapshot: &LotSnapshot) -> Assessment {
        if snapshot.owners.is_empty() {
            return Assessment::not_started(&[Self::MISSING_OWNERS]);
        }
        if snapshot.compensations.is_empty() {
            return Assessment::not_started(&[Self::MISSING_RECORDS]);
        }

        let per_owner = Self::owner_checks(snapshot);
        let met: usize = per_owner.iter().map(|c| c.met()).sum();
        let completeness = met as f64 / (4 * per_owner.len()) as f64;

        // First unmet check in fixed order across all owners, one hint only
        let missing = (0..4)
            .find(|&i| per_owner.iter().any(|c| !c.as_array()[i]))
            .map(|i| vec![CompensationChecks::LABELS[i].to_string()])
            .unwrap_or_default();

        Assessment {
            completeness,
            missing,
        }
    }
}
