//! Lot phase resolution
//!
//! Displays name a lot's phase by the step that comes *next*: a lot whose
//! last completed section is Valuation is shown in the "Compensation"
//! phase. This mapping is the default ([`PhaseNaming::NextStep`]) and is
//! kept as downstream charts and timelines expect it.
//!
//! Two strategies produce the phase:
//! - [`LastCompletedStrategy`]: uses the explicit last completed section
//! - [`PercentThresholdStrategy`]: falls back to percentage bands when only
//!   a percentage is known
//!
//! [`PhaseResolver`] picks the first strategy that has the data it needs.

use crate::section::Section;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Phase a lot is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LotPhase {
    /// Owner details
    #[serde(rename = "Owner Details")]
    OwnerDetails,
    /// Land details
    #[serde(rename = "Land Details")]
    LandDetails,
    /// Valuation
    #[serde(rename = "Valuation")]
    Valuation,
    /// Compensation
    #[serde(rename = "Compensation")]
    Compensation,
    /// Every section complete
    #[serde(rename = "Completed")]
    Completed,
}

impl LotPhase {
    /// All phases in workflow order
    pub const ALL: [LotPhase; 5] = [
        LotPhase::OwnerDetails,
        LotPhase::LandDetails,
        LotPhase::Valuation,
        LotPhase::Compensation,
        LotPhase::Completed,
    ];

    /// Display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OwnerDetails => "Owner Details",
            Self::LandDetails => "Land Details",
            Self::Valuation => "Valuation",
            Self::Compensation => "Compensation",
            Self::Completed => "Completed",
        }
    }

    /// Phase sharing a section's name
    #[must_use]
    pub const fn of_section(section: Section) -> Self {
        match section {
            Section::OwnerDetails => Self::OwnerDetails,
            Section::LandDetails => Self::LandDetails,
            Section::Valuation => Self::Valuation,
            Section::Compensation => Self::Compensation,
        }
    }
}

impl Display for LotPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown phase name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown phase: {0}")]
pub struct ParsePhaseError(pub String);

impl FromStr for LotPhase {
    type Err = ParsePhaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if ["completed", "complete", "done"]
            .iter()
            .any(|name| trimmed.eq_ignore_ascii_case(name))
        {
            return Ok(Self::Completed);
        }
        trimmed
            .parse::<Section>()
            .map(Self::of_section)
            .map_err(|_| ParsePhaseError(s.to_string()))
    }
}

/// How a lot's phase is named from its last completed section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseNaming {
    /// Name the phase after the next step (Valuation done -> "Compensation")
    #[default]
    NextStep,
    /// Name the phase after the last completed section (Valuation done -> "Valuation")
    LastCompleted,
}

impl PhaseNaming {
    /// Phase for a lot below 100% given its last completed section
    #[must_use]
    pub const fn phase_after(self, last_completed: Option<Section>) -> LotPhase {
        match (self, last_completed) {
            (_, None) => LotPhase::OwnerDetails,
            (Self::NextStep, Some(Section::OwnerDetails)) => LotPhase::LandDetails,
            (Self::NextStep, Some(Section::LandDetails)) => LotPhase::Valuation,
            (Self::NextStep, Some(Section::Valuation | Section::Compensation)) => {
                LotPhase::Compensation
            }
            (Self::LastCompleted, Some(section)) => LotPhase::of_section(section),
        }
    }
}

/// Data a strategy may use to place a lot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseInput {
    /// Overall percentage, 0-100
    pub overall_percent: u8,
    /// Last section of the complete prefix, when known
    pub last_completed: Option<Section>,
}

impl PhaseInput {
    /// Input with an explicit last completed section
    #[inline]
    #[must_use]
    pub const fn new(overall_percent: u8, last_completed: Option<Section>) -> Self {
        Self {
            overall_percent,
            last_completed,
        }
    }

    /// Input carrying only a percentage
    #[inline]
    #[must_use]
    pub const fn from_percent(overall_percent: u8) -> Self {
        Self::new(overall_percent, None)
    }
}

/// Strategy placing a lot in a phase
pub trait PhaseStrategy: Send + Sync + std::fmt::Debug {
    /// Phase for the input, or `None` when the strategy lacks the data it needs
    fn classify(&self, input: &PhaseInput, naming: PhaseNaming) -> Option<LotPhase>;

    /// Strategy name (for debugging/logging)
    fn name(&self) -> &'static str;
}

/// Places lots by their explicit last completed section
#[derive(Debug, Clone, Copy, Default)]
pub struct LastCompletedStrategy;

impl PhaseStrategy for LastCompletedStrategy {
    fn classify(&self, input: &PhaseInput, naming: PhaseNaming) -> Option<LotPhase> {
        if input.overall_percent >= 100 {
            return Some(LotPhase::Completed);
        }
        input.last_completed.map(|s| naming.phase_after(Some(s)))
    }

    fn name(&self) -> &'static str {
        "last_completed"
    }
}

/// Places lots by percentage bands of 25 points
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentThresholdStrategy;

impl PercentThresholdStrategy {
    /// Last completed section implied by a percentage
    #[must_use]
    pub const fn implied_last_completed(percent: u8) -> Option<Section> {
        match percent {
            75.. => Some(Section::Valuation),
            50.. => Some(Section::LandDetails),
            25.. => Some(Section::OwnerDetails),
            _ => None,
        }
    }
}

impl PhaseStrategy for PercentThresholdStrategy {
    fn classify(&self, input: &PhaseInput, naming: PhaseNaming) -> Option<LotPhase> {
        if input.overall_percent >= 100 {
            return Some(LotPhase::Completed);
        }
        Some(naming.phase_after(Self::implied_last_completed(input.overall_percent)))
    }

    fn name(&self) -> &'static str {
        "percent_threshold"
    }
}

/// Resolves a lot's phase through an ordered list of strategies
#[derive(Debug)]
pub struct PhaseResolver {
    naming: PhaseNaming,
    strategies: Vec<Box<dyn PhaseStrategy>>,
}

impl PhaseResolver {
    /// Explicit section first, percentage bands as fallback
    #[must_use]
    pub fn new(naming: PhaseNaming) -> Self {
        Self {
            naming,
            strategies: vec![
                Box::new(LastCompletedStrategy),
                Box::new(PercentThresholdStrategy),
            ],
        }
    }

    /// Naming in effect
    #[inline]
    #[must_use]
    pub fn naming(&self) -> PhaseNaming {
        self.naming
    }

    /// Names of the strategies, in the order they are tried
    #[must_use]
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Phase and the strategy that produced it
    #[must_use]
    pub fn resolve_with_strategy(&self, input: &PhaseInput) -> (LotPhase, &'static str) {
        self.strategies
            .iter()
            .find_map(|s| s.classify(input, self.naming).map(|phase| (phase, s.name())))
            .unwrap_or((LotPhase::OwnerDetails, "default"))
    }

    /// Phase for a lot
    #[must_use]
    pub fn resolve(&self, input: &PhaseInput) -> LotPhase {
        self.resolve_with_strategy(input).0
    }
}

impl Default for PhaseResolver {
    fn default() -> Self {
        Self::new(PhaseNaming::default())
    }
}
