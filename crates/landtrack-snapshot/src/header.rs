//! Plan and project header fields
//!
//! The gazette and survey references captured when a plan or project is
//! first registered. Only used when creation-weighted aggregation is on.

use crate::amount::{lenient, Amount};
use crate::ids::{PlanId, ProjectId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registration fields of a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanHeader {
    /// Plan
    pub plan_id: PlanId,
    /// Plan / cadastral number
    #[serde(default)]
    pub plan_identifier: Option<String>,
    /// Section 07 gazette number
    #[serde(default)]
    pub section_07_gazette_no: Option<String>,
    /// Section 07 gazette date
    #[serde(default, deserialize_with = "lenient::date")]
    pub section_07_gazette_date: Option<NaiveDate>,
    /// Section 38 gazette number
    #[serde(default)]
    pub section_38_gazette_no: Option<String>,
    /// Section 38 gazette date
    #[serde(default, deserialize_with = "lenient::date")]
    pub section_38_gazette_date: Option<NaiveDate>,
    /// Section 5 gazette number
    #[serde(default)]
    pub section_5_gazette_no: Option<String>,
    /// Divisional secretariat
    #[serde(default)]
    pub divisional_secretary: Option<String>,
}

/// Registration fields of a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectHeader {
    /// Project
    pub project_id: ProjectId,
    /// Project name
    #[serde(default)]
    pub name: Option<String>,
    /// Initial estimated cost
    #[serde(default, deserialize_with = "lenient::optional_amount")]
    pub initial_estimated_cost: Option<Amount>,
    /// Initial estimated extent in hectares
    #[serde(default, deserialize_with = "lenient::optional_amount")]
    pub initial_extent_ha: Option<Amount>,
    /// Section 2 order date
    #[serde(default, deserialize_with = "lenient::date")]
    pub section_2_order: Option<NaiveDate>,
    /// Section 2 completion date
    #[serde(default, deserialize_with = "lenient::date")]
    pub section_2_completion: Option<NaiveDate>,
    /// Advance tracing number
    #[serde(default)]
    pub advance_tracing_no: Option<String>,
    /// Advance tracing date
    #[serde(default, deserialize_with = "lenient::date")]
    pub advance_tracing_date: Option<NaiveDate>,
    /// Section 5 number
    #[serde(default)]
    pub section_5_no: Option<String>,
    /// Section 5 date
    #[serde(default, deserialize_with = "lenient::date")]
    pub section_5_date: Option<NaiveDate>,
}

/// Text field holds something other than whitespace
#[inline]
#[must_use]
pub fn is_filled(field: Option<&str>) -> bool {
    field.is_some_and(|s| !s.trim().is_empty())
}
