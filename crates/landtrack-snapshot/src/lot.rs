//! Lot snapshot
//!
//! A read-only bundle of everything the progress engine needs to know
//! about one lot at one point in time.

use crate::amount::lenient;
use crate::ids::{LotId, OwnerId, PlanId};
use crate::records::{CompensationRecord, Extent, LandDetailRecord, OwnerLink, ValuationRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Point-in-time view of a lot and its workflow records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotSnapshot {
    /// Lot
    pub lot_id: LotId,
    /// Owning plan
    pub plan_id: PlanId,
    /// Lot number as printed on the plan
    #[serde(default)]
    pub lot_number: String,
    /// Lot extent
    #[serde(default)]
    pub extent: Extent,
    /// Land type recorded on the lot itself
    #[serde(default)]
    pub land_type: Option<String>,
    /// Store status of the lot row
    #[serde(default)]
    pub status: String,
    /// Active owner links
    #[serde(default)]
    pub owners: Vec<OwnerLink>,
    /// Survey details, if captured
    #[serde(default)]
    pub land_details: Option<LandDetailRecord>,
    /// Latest valuation, if any
    #[serde(default)]
    pub valuation: Option<ValuationRecord>,
    /// One compensation record per owner
    #[serde(default)]
    pub compensations: Vec<CompensationRecord>,
    /// When the collaborator read this snapshot
    #[serde(default, deserialize_with = "lenient::date")]
    pub captured_on: Option<NaiveDate>,
}

impl LotSnapshot {
    /// Empty snapshot for a lot
    #[must_use]
    pub fn new(lot_id: LotId, plan_id: PlanId) -> Self {
        Self {
            lot_id,
            plan_id,
            lot_number: String::new(),
            extent: Extent::default(),
            land_type: None,
            status: String::new(),
            owners: Vec::new(),
            land_details: None,
            valuation: None,
            compensations: Vec::new(),
            captured_on: None,
        }
    }

    /// With lot number
    #[inline]
    #[must_use]
    pub fn with_lot_number(mut self, lot_number: impl Into<String>) -> Self {
        self.lot_number = lot_number.into();
        self
    }

    /// With an additional owner link
    #[inline]
    #[must_use]
    pub fn with_owner(mut self, link: OwnerLink) -> Self {
        self.owners.push(link);
        self
    }

    /// With land details
    #[inline]
    #[must_use]
    pub fn with_land_details(mut self, land: LandDetailRecord) -> Self {
        self.land_details = Some(land);
        self
    }

    /// With valuation
    #[inline]
    #[must_use]
    pub fn with_valuation(mut self, valuation: ValuationRecord) -> Self {
        self.valuation = Some(valuation);
        self
    }

    /// With an additional compensation record
    #[inline]
    #[must_use]
    pub fn with_compensation(mut self, record: CompensationRecord) -> Self {
        self.compensations.push(record);
        self
    }

    /// Number of linked owners
    #[inline]
    #[must_use]
    pub fn owner_count(&self) -> usize {
        self.owners.len()
    }

    /// Compensation record for an owner (first match)
    #[must_use]
    pub fn compensation_for(&self, owner_id: OwnerId) -> Option<&CompensationRecord> {
        self.compensations.iter().find(|c| c.owner_id == owner_id)
    }

    /// Latest dated activity: assessment or account division
    #[must_use]
    pub fn last_activity(&self) -> Option<NaiveDate> {
        let assessed = self.valuation.as_ref().and_then(|v| v.assessment_date);
        self.compensations
            .iter()
            .filter_map(|c| c.account_division_date)
            .chain(assessed)
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Amount;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builder_collects_records() {
        let snap = LotSnapshot::new(LotId::new(1), PlanId::new(9))
            .with_lot_number("12A")
            .with_owner(OwnerLink::new(OwnerId::new(5), 60.0))
            .with_owner(OwnerLink::new(OwnerId::new(6), 40.0))
            .with_compensation(CompensationRecord::new(OwnerId::new(6)));

        assert_eq!(snap.owner_count(), 2);
        assert!(snap.compensation_for(OwnerId::new(6)).is_some());
        assert!(snap.compensation_for(OwnerId::new(5)).is_none());
    }

    #[test]
    fn last_activity_takes_latest_date() {
        let mut comp = CompensationRecord::new(OwnerId::new(1));
        comp.account_division_date = Some(date(2024, 6, 1));
        let snap = LotSnapshot::new(LotId::new(1), PlanId::new(1))
            .with_valuation(ValuationRecord {
                total_value: Amount::new(10.0),
                assessment_date: Some(date(2024, 1, 15)),
                ..ValuationRecord::default()
            })
            .with_compensation(comp);

        assert_eq!(snap.last_activity(), Some(date(2024, 6, 1)));
        assert_eq!(LotSnapshot::new(LotId::new(2), PlanId::new(1)).last_activity(), None);
    }

    #[test]
    fn minimal_json_snapshot() {
        let snap: LotSnapshot = serde_json::from_str(r#"{"lot_id": 4, "plan_id": 2}"#).unwrap();
        assert!(snap.owners.is_empty());
        assert!(snap.land_details.is_none());
        assert!(snap.valuation.is_none());
        assert!(snap.compensations.is_empty());
    }
}
