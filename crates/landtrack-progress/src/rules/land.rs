//! Land Details rule

use super::{Assessment, SectionRule};
use crate::section::Section;
use landtrack_snapshot::{is_filled, LotSnapshot};

/// Land type plus a positive surveyed extent
///
/// The land type on the survey record wins; the lot row's own land type is
/// used when the survey record leaves it blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandRule;

impl LandRule {
    /// Label for a missing land type
    pub const MISSING_LAND_TYPE: &'static str = "land type";
    /// Label for a missing advance-tracing / preliminary-plan extent
    pub const MISSING_EXTENT: &'static str = "land extent";
}

impl SectionRule for LandRule {
    fn section(&self) -> Section {
        Section::LandDetails
    }

    fn assess(&self, snapshot: &LotSnapshot) -> Assessment {
        let Some(land) = snapshot.land_details.as_ref() else {
            return Assessment::not_started(&[Self::MISSING_LAND_TYPE, Self::MISSING_EXTENT]);
        };

        let has_type = land.land_type().is_some() || is_filled(snapshot.land_type.as_deref());
        Assessment::from_checks(&[
            (has_type, Self::MISSING_LAND_TYPE),
            (land.has_extent(), Self::MISSING_EXTENT),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landtrack_snapshot::{Extent, LandDetailRecord, LotId, PlanId};

    fn snap(land: Option<LandDetailRecord>) -> LotSnapshot {
        let mut s = LotSnapshot::new(LotId::new(1), PlanId::new(1));
        s.land_details = land;
        s
    }

    #[test]
    fn absent_record_is_not_started() {
        let a = LandRule.assess(&snap(None));
        assert_eq!(a.completeness, 0.0);
        assert_eq!(a.missing.len(), 2);
    }

    #[test]
    fn type_without_extent_is_partial() {
        let a = LandRule.assess(&snap(Some(LandDetailRecord {
            land_type: Some("Paddy".into()),
            ..LandDetailRecord::default()
        })));
        assert_eq!(a.completeness, 0.5);
        assert_eq!(a.missing, vec!["land extent".to_string()]);
    }

    #[test]
    fn either_extent_completes() {
        let a = LandRule.assess(&snap(Some(LandDetailRecord {
            land_type: Some("Highland".into()),
            advance_tracing_extent: Extent::default(),
            preliminary_plan_extent: Extent::perches(14.5),
        })));
        assert_eq!(a, Assessment::complete());
    }

    #[test]
    fn lot_row_land_type_is_fallback() {
        let mut s = snap(Some(LandDetailRecord {
            land_type: None,
            advance_tracing_extent: Extent::hectares(0.1),
            preliminary_plan_extent: Extent::default(),
        }));
        assert_eq!(LandRule.assess(&s).completeness, 0.5);
        s.land_type = Some("Bare land".into());
        assert_eq!(LandRule.assess(&s).completeness, 1.0);
    }
}
