//! Hierarchical aggregation
//!
//! Plans average their lots and projects average their plans. Each level
//! rounds on its own, so a project's figure is derived from the already
//! rounded plan figures and never from raw lots.
//!
//! The aggregator folds exactly the list it is given. Filtering happens
//! before the call.

use crate::lot::LotProgress;
use landtrack_snapshot::{is_filled, PlanHeader, PlanId, ProjectHeader, ProjectId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Completion state of a plan or project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateStatus {
    /// No children, or none of them has progressed
    NotStarted,
    /// Some progress but not every child completed
    InProgress,
    /// Every child completed
    Completed,
}

impl AggregateStatus {
    /// Store/API representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    fn derive(progress: u8, completed: usize, total: usize) -> Self {
        if total > 0 && completed == total && progress == 100 {
            Self::Completed
        } else if progress == 0 {
            Self::NotStarted
        } else {
            Self::InProgress
        }
    }
}

impl Display for AggregateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How child progress is combined with header completeness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationPolicy {
    /// Share of the progress figure, 0-100, taken by the header's creation
    /// score; the child average fills the rest
    pub creation_weight_percent: u8,
}

impl AggregationPolicy {
    /// Plain unweighted mean of the children
    pub const UNWEIGHTED: Self = Self {
        creation_weight_percent: 0,
    };

    /// Policy blending in the creation score at `percent`
    #[inline]
    #[must_use]
    pub const fn with_creation_weight(percent: u8) -> Self {
        Self {
            creation_weight_percent: percent,
        }
    }

    /// Header completeness takes part in the figure
    #[inline]
    #[must_use]
    pub const fn uses_creation(&self) -> bool {
        self.creation_weight_percent > 0
    }

    fn blend(self, creation_score: f64, child_mean: f64) -> f64 {
        let w = f64::from(self.creation_weight_percent.min(100));
        creation_score * w + child_mean * (100.0 - w) / 100.0
    }
}

/// Progress of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    /// Plan
    pub plan_id: PlanId,
    /// Lots in the `Completed` phase
    pub completed_count: usize,
    /// Lots folded
    pub total_count: usize,
    /// Rounded progress, 0-100
    pub progress: u8,
    /// Completion state
    pub status: AggregateStatus,
    /// Unrounded mean of lot percentages
    pub child_average: f64,
    /// Header completeness in [0, 1] when creation weighting was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_score: Option<f64>,
}

/// Progress of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProgress {
    /// Project
    pub project_id: ProjectId,
    /// Plans whose status is completed
    pub completed_count: usize,
    /// Plans folded
    pub total_count: usize,
    /// Rounded progress, 0-100
    pub progress: u8,
    /// Completion state
    pub status: AggregateStatus,
    /// Unrounded mean of plan progress
    pub child_average: f64,
    /// Header completeness in [0, 1] when creation weighting was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_score: Option<f64>,
}

/// Fold a plan's lots into its progress
#[must_use]
pub fn aggregate_plan(plan_id: PlanId, lots: &[LotProgress]) -> PlanProgress {
    let completed = lots.iter().filter(|l| l.is_completed()).count();
    let (progress, mean) = fold(lots.iter().map(|l| l.overall_percent));

    tracing::debug!(%plan_id, lots = lots.len(), completed, progress, "aggregated plan");

    PlanProgress {
        plan_id,
        completed_count: completed,
        total_count: lots.len(),
        progress,
        status: AggregateStatus::derive(progress, completed, lots.len()),
        child_average: mean,
        creation_score: None,
    }
}

/// Fold a project's plans into its progress
#[must_use]
pub fn aggregate_project(project_id: ProjectId, plans: &[PlanProgress]) -> ProjectProgress {
    let completed = plans
        .iter()
        .filter(|p| p.status == AggregateStatus::Completed)
        .count();
    let (progress, mean) = fold(plans.iter().map(|p| p.progress));

    tracing::debug!(%project_id, plans = plans.len(), completed, progress, "aggregated project");

    ProjectProgress {
        project_id,
        completed_count: completed,
        total_count: plans.len(),
        progress,
        status: AggregateStatus::derive(progress, completed, plans.len()),
        child_average: mean,
        creation_score: None,
    }
}

/// Plan progress with the header's creation score blended in
///
/// With a zero weight this is [`aggregate_plan`].
#[must_use]
pub fn aggregate_plan_with_header(
    header: &PlanHeader,
    lots: &[LotProgress],
    policy: AggregationPolicy,
) -> PlanProgress {
    let mut plan = aggregate_plan(header.plan_id, lots);
    if policy.uses_creation() {
        let score = plan_creation_score(header);
        plan.progress = to_percent(policy.blend(score, plan.child_average));
        plan.status = blended_status(plan.progress, plan.completed_count, plan.total_count);
        plan.creation_score = Some(score);
    }
    plan
}

/// Project progress with the header's creation score blended in
///
/// With a zero weight this is [`aggregate_project`].
#[must_use]
pub fn aggregate_project_with_header(
    header: &ProjectHeader,
    plans: &[PlanProgress],
    policy: AggregationPolicy,
) -> ProjectProgress {
    let mut project = aggregate_project(header.project_id, plans);
    if policy.uses_creation() {
        let score = project_creation_score(header);
        project.progress = to_percent(policy.blend(score, project.child_average));
        project.status =
            blended_status(project.progress, project.completed_count, project.total_count);
        project.creation_score = Some(score);
    }
    project
}

/// Completeness of a plan's registration fields, in [0, 1]
///
/// Ten points: identifier 2, section 07 gazette 3, section 38 gazette 3,
/// divisional secretary 1, section 5 gazette number 1. A gazette with only
/// its number or only its date earns half.
#[must_use]
pub fn plan_creation_score(header: &PlanHeader) -> f64 {
    let points = flag(is_filled(header.plan_identifier.as_deref()), 2.0)
        + paired(
            is_filled(header.section_07_gazette_no.as_deref()),
            header.section_07_gazette_date.is_some(),
            3.0,
        )
        + paired(
            is_filled(header.section_38_gazette_no.as_deref()),
            header.section_38_gazette_date.is_some(),
            3.0,
        )
        + flag(is_filled(header.divisional_secretary.as_deref()), 1.0)
        + flag(is_filled(header.section_5_gazette_no.as_deref()), 1.0);
    (points / 10.0).clamp(0.0, 1.0)
}

/// Completeness of a project's registration fields, in [0, 1]
///
/// Ten points: name 2, estimated cost 1, extent 1, section 2 order and
/// completion 2, advance tracing 2, section 5 2.
#[must_use]
pub fn project_creation_score(header: &ProjectHeader) -> f64 {
    let points = flag(is_filled(header.name.as_deref()), 2.0)
        + flag(header.initial_estimated_cost.is_some_and(|a| a.is_positive()), 1.0)
        + flag(header.initial_extent_ha.is_some_and(|a| a.is_positive()), 1.0)
        + paired(
            header.section_2_order.is_some(),
            header.section_2_completion.is_some(),
            2.0,
        )
        + paired(
            is_filled(header.advance_tracing_no.as_deref()),
            header.advance_tracing_date.is_some(),
            2.0,
        )
        + paired(
            is_filled(header.section_5_no.as_deref()),
            header.section_5_date.is_some(),
            2.0,
        );
    (points / 10.0).clamp(0.0, 1.0)
}

fn flag(set: bool, points: f64) -> f64 {
    if set {
        points
    } else {
        0.0
    }
}

fn paired(first: bool, second: bool, points: f64) -> f64 {
    match (first, second) {
        (true, true) => points,
        (true, false) | (false, true) => points / 2.0,
        (false, false) => 0.0,
    }
}

// Header progress alone can move a childless node off not_started
fn blended_status(progress: u8, completed: usize, total: usize) -> AggregateStatus {
    if total == 0 {
        if progress == 0 {
            AggregateStatus::NotStarted
        } else {
            AggregateStatus::InProgress
        }
    } else {
        AggregateStatus::derive(progress, completed, total)
    }
}

/// Rounded mean and raw mean; an empty list is 0
#[allow(clippy::cast_precision_loss)]
fn fold(values: impl Iterator<Item = u8>) -> (u8, f64) {
    let (sum, count) = values.fold((0u64, 0usize), |(sum, count), v| {
        (sum + u64::from(v), count + 1)
    });
    if count == 0 {
        return (0, 0.0);
    }
    let mean = sum as f64 / count as f64;
    (to_percent(mean), mean)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 100.0) as u8
    } else {
        0
    }
}
