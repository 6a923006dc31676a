//! Raw entity records attached to a lot
//!
//! One record type per workflow section. Field names follow the store
//! columns closely enough that the snapshot collaborator can map rows
//! without transformation.

use crate::amount::{lenient, Amount};
use crate::ids::OwnerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Area measured in hectares and/or perches
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Hectares
    #[serde(default, with = "extent_unit")]
    pub hectares: Option<f64>,

    /// Perches
    #[serde(default, with = "extent_unit")]
    pub perches: Option<f64>,
}

impl Extent {
    /// Extent given in hectares only
    #[inline]
    #[must_use]
    pub fn hectares(value: f64) -> Self {
        Self {
            hectares: Some(value),
            perches: None,
        }
    }

    /// Extent given in perches only
    #[inline]
    #[must_use]
    pub fn perches(value: f64) -> Self {
        Self {
            hectares: None,
            perches: Some(value),
        }
    }

    /// Either unit holds a positive number
    #[inline]
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.hectares.is_some_and(|v| v > 0.0) || self.perches.is_some_and(|v| v > 0.0)
    }
}

/// Extent units share the lenient amount parser
mod extent_unit {
    use crate::amount::lenient;
    use serde::{Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        value.serialize(s)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(lenient::optional_amount(d)?.map(crate::Amount::value))
    }
}

/// Link between a lot and one of its owners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerLink {
    /// Owner
    pub owner_id: OwnerId,

    /// Share of the lot held by this owner (0-100)
    #[serde(default, deserialize_with = "share")]
    pub ownership_percent: f64,
}

fn share<'de, D: serde::Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(lenient::optional_amount(d)?.map_or(0.0, crate::Amount::value))
}

impl OwnerLink {
    /// Create link
    #[inline]
    #[must_use]
    pub fn new(owner_id: OwnerId, ownership_percent: f64) -> Self {
        Self {
            owner_id,
            ownership_percent,
        }
    }
}

/// Survey details captured for a lot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandDetailRecord {
    /// Land classification (paddy, highland, ...)
    #[serde(default)]
    pub land_type: Option<String>,

    /// Extent from the advance tracing
    #[serde(default)]
    pub advance_tracing_extent: Extent,

    /// Extent from the preliminary plan
    #[serde(default)]
    pub preliminary_plan_extent: Extent,
}

impl LandDetailRecord {
    /// Land type, ignoring blank entries
    #[must_use]
    pub fn land_type(&self) -> Option<&str> {
        self.land_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// At least one surveyed extent is positive
    #[inline]
    #[must_use]
    pub fn has_extent(&self) -> bool {
        self.advance_tracing_extent.is_positive() || self.preliminary_plan_extent.is_positive()
    }
}

/// Review state of a valuation
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ValuationStatus {
    /// Being drafted
    #[default]
    Draft,
    /// Submitted for approval
    Pending,
    /// Approved by the valuation department
    Approved,
    /// Closed out
    Completed,
    /// Sent back
    Rejected,
    /// Any other store value, kept verbatim
    Other(String),
}

impl ValuationStatus {
    /// Parse store value, case-insensitive
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "draft" => Self::Draft,
            "pending" | "submitted" => Self::Pending,
            "approved" => Self::Approved,
            "completed" | "complete" => Self::Completed,
            "rejected" => Self::Rejected,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// Approved or completed
    #[inline]
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Approved | Self::Completed)
    }

    /// Store representation
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Other(raw) => raw,
        }
    }
}

impl Display for ValuationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ValuationStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ValuationStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Self::Draft, Self::parse))
    }
}

/// Valuation assessed for a lot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationRecord {
    /// Statutory compensation component
    #[serde(default)]
    pub statutory: Amount,
    /// Additions
    #[serde(default)]
    pub addition: Amount,
    /// Development component
    #[serde(default)]
    pub development: Amount,
    /// Court-determined component
    #[serde(default)]
    pub court: Amount,
    /// Thirty-three percent allowance
    #[serde(default)]
    pub thirty_three_percent: Amount,
    /// Board of review component
    #[serde(default)]
    pub board_of_review: Amount,
    /// Recorded total (not verified against the components)
    #[serde(default)]
    pub total_value: Amount,
    /// Date of assessment
    #[serde(default, deserialize_with = "lenient::date")]
    pub assessment_date: Option<NaiveDate>,
    /// Review state
    #[serde(default)]
    pub status: ValuationStatus,
}

impl ValuationRecord {
    /// The six monetary components in assessment order
    #[must_use]
    pub fn components(&self) -> [Amount; 6] {
        [
            self.statutory,
            self.addition,
            self.development,
            self.court,
            self.thirty_three_percent,
            self.board_of_review,
        ]
    }

    /// Number of non-zero components
    #[must_use]
    pub fn populated_components(&self) -> usize {
        self.components().iter().filter(|a| !a.is_zero()).count()
    }
}

/// Compensation owed to one owner of a lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationRecord {
    /// Owner this record pays
    pub owner_id: OwnerId,
    /// Final compensation amount
    #[serde(default)]
    pub total_compensation: Amount,
    /// Paid so far
    #[serde(default)]
    pub amount_paid: Amount,
    /// Outstanding balance
    #[serde(default)]
    pub balance_due: Amount,
    /// Interest calculated as owed
    #[serde(default, deserialize_with = "lenient::optional_amount")]
    pub interest_due: Option<Amount>,
    /// Interest paid so far
    #[serde(default, deserialize_with = "lenient::optional_amount")]
    pub interest_paid: Option<Amount>,
    /// Date the account-division letter was sent
    #[serde(default, deserialize_with = "lenient::date")]
    pub account_division_date: Option<NaiveDate>,
    /// Free-form store status
    #[serde(default)]
    pub status: String,
}

impl CompensationRecord {
    /// Empty record for an owner
    #[must_use]
    pub fn new(owner_id: OwnerId) -> Self {
        Self {
            owner_id,
            total_compensation: Amount::ZERO,
            amount_paid: Amount::ZERO,
            balance_due: Amount::ZERO,
            interest_due: None,
            interest_paid: None,
            account_division_date: None,
            status: String::new(),
        }
    }

    /// Compensation amount has been set
    #[inline]
    #[must_use]
    pub fn has_amount(&self) -> bool {
        self.total_compensation.is_positive()
    }

    /// Balance due is exactly zero; an overpaid (negative) balance is not settled
    #[inline]
    #[must_use]
    pub fn balance_settled(&self) -> bool {
        self.balance_due.is_zero()
    }

    /// Interest paid covers interest due, both recorded
    #[inline]
    #[must_use]
    pub fn interest_reconciled(&self) -> bool {
        match (self.interest_due, self.interest_paid) {
            (Some(due), Some(paid)) => paid.value() >= due.value(),
            _ => false,
        }
    }

    /// Account-division date recorded
    #[inline]
    #[must_use]
    pub fn has_division_date(&self) -> bool {
        self.account_division_date.is_some()
    }
}
