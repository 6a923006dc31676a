//! Workflow sections and their evaluation results
//!
//! A lot moves through four sections in a fixed order. Each later section
//! depends on the one before it being complete.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Percentage points each section contributes to a lot's overall progress
pub const SECTION_WEIGHT: f64 = 25.0;

/// Workflow section
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Owners linked to the lot
    #[serde(rename = "Owner Details")]
    OwnerDetails,
    /// Survey details
    #[serde(rename = "Land Details")]
    LandDetails,
    /// Valuation assessment
    #[serde(rename = "Valuation")]
    Valuation,
    /// Compensation payments
    #[serde(rename = "Compensation")]
    Compensation,
}

impl Section {
    /// Sections in workflow order
    pub const ORDER: [Section; 4] = [
        Section::OwnerDetails,
        Section::LandDetails,
        Section::Valuation,
        Section::Compensation,
    ];

    /// Display name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OwnerDetails => "Owner Details",
            Self::LandDetails => "Land Details",
            Self::Valuation => "Valuation",
            Self::Compensation => "Compensation",
        }
    }

    /// Position in [`Section::ORDER`]
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::OwnerDetails => 0,
            Self::LandDetails => 1,
            Self::Valuation => 2,
            Self::Compensation => 3,
        }
    }

    /// Section that must be complete before this one can progress
    #[inline]
    #[must_use]
    pub const fn prerequisite(self) -> Option<Section> {
        match self {
            Self::OwnerDetails => None,
            Self::LandDetails => Some(Self::OwnerDetails),
            Self::Valuation => Some(Self::LandDetails),
            Self::Compensation => Some(Self::Valuation),
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown section name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section: {0}")]
pub struct ParseSectionError(pub String);

impl FromStr for Section {
    type Err = ParseSectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c.to_ascii_lowercase() })
            .collect();
        match normalized.as_str() {
            "owner details" | "owners" | "owner" => Ok(Self::OwnerDetails),
            "land details" | "land" => Ok(Self::LandDetails),
            "valuation" => Ok(Self::Valuation),
            "compensation" => Ok(Self::Compensation),
            _ => Err(ParseSectionError(s.to_string())),
        }
    }
}

/// Completeness verdict for one section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// No qualifying data yet
    NotStarted,
    /// Some but not all criteria met
    Partial,
    /// Prerequisite section incomplete
    Blocked,
    /// All criteria met
    Complete,
}

impl SectionStatus {
    /// Status implied by a completeness fraction
    #[must_use]
    pub fn from_completeness(completeness: f64) -> Self {
        if completeness >= 1.0 {
            Self::Complete
        } else if completeness > 0.0 {
            Self::Partial
        } else {
            Self::NotStarted
        }
    }

    /// Store/API representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Partial => "partial",
            Self::Blocked => "blocked",
            Self::Complete => "complete",
        }
    }
}

impl Display for SectionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating one section of one lot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionResult {
    /// Section evaluated
    #[serde(rename = "name")]
    pub section: Section,
    /// Verdict
    pub status: SectionStatus,
    /// Field labels still missing, most actionable first
    pub missing: Vec<String>,
    /// Fraction of criteria met, in [0, 1]
    pub completeness: f64,
}

impl SectionResult {
    /// Result whose status follows from its completeness
    #[must_use]
    pub fn scored(section: Section, completeness: f64, missing: Vec<String>) -> Self {
        let completeness = if completeness.is_finite() {
            completeness.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            section,
            status: SectionStatus::from_completeness(completeness),
            missing,
            completeness,
        }
    }

    /// Section held back by an incomplete prerequisite
    #[must_use]
    pub fn blocked(section: Section, prerequisite: Section) -> Self {
        Self {
            section,
            status: SectionStatus::Blocked,
            missing: vec![format!("Complete {prerequisite} first")],
            completeness: 0.0,
        }
    }

    /// Section name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.section.name()
    }

    /// Status is exactly complete
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SectionStatus::Complete
    }

    /// Contribution to the lot's overall percentage
    #[inline]
    #[must_use]
    pub fn weighted_points(&self) -> f64 {
        self.completeness * SECTION_WEIGHT
    }
}
