//! Testing utilities for Landtrack workspace
//!
//! Shared snapshot fixtures covering each workflow stage.

#![allow(missing_docs)]

use chrono::NaiveDate;
use landtrack_snapshot::{
    Amount, CompensationRecord, Extent, LandDetailRecord, LotId, LotSnapshot, OwnerId, OwnerLink,
    PlanHeader, PlanId, ProjectHeader, ProjectId, ValuationRecord, ValuationStatus,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn empty_lot(lot: u64, plan: u64) -> LotSnapshot {
    LotSnapshot::new(LotId::new(lot), PlanId::new(plan)).with_lot_number(lot.to_string())
}

pub fn owner(id: u64) -> OwnerLink {
    OwnerLink::new(OwnerId::new(id), 100.0)
}

pub fn complete_land() -> LandDetailRecord {
    LandDetailRecord {
        land_type: Some("Paddy".into()),
        advance_tracing_extent: Extent::hectares(0.42),
        preliminary_plan_extent: Extent::default(),
    }
}

pub fn approved_valuation() -> ValuationRecord {
    ValuationRecord {
        statutory: Amount::new(380_000.0),
        addition: Amount::new(20_000.0),
        development: Amount::new(50_000.0),
        total_value: Amount::new(450_000.0),
        assessment_date: Some(date(2024, 2, 12)),
        status: ValuationStatus::Approved,
        ..ValuationRecord::default()
    }
}

/// Record meeting all four compensation checks
pub fn settled_compensation(owner: u64) -> CompensationRecord {
    CompensationRecord {
        total_compensation: Amount::new(450_000.0),
        amount_paid: Amount::new(450_000.0),
        balance_due: Amount::ZERO,
        interest_due: Some(Amount::new(12_000.0)),
        interest_paid: Some(Amount::new(12_000.0)),
        account_division_date: Some(date(2024, 6, 30)),
        status: "paid".into(),
        ..CompensationRecord::new(OwnerId::new(owner))
    }
}

/// Amount set and balance settled, interest and division date outstanding
pub fn half_settled_compensation(owner: u64) -> CompensationRecord {
    CompensationRecord {
        interest_paid: Some(Amount::new(3_000.0)),
        account_division_date: None,
        status: "partial".into(),
        ..settled_compensation(owner)
    }
}

/// Owner linked, nothing else
pub fn owner_only_lot(lot: u64, plan: u64) -> LotSnapshot {
    empty_lot(lot, plan).with_owner(owner(1))
}

/// Owner, land details and an approved valuation
pub fn valued_lot(lot: u64, plan: u64) -> LotSnapshot {
    owner_only_lot(lot, plan)
        .with_land_details(complete_land())
        .with_valuation(approved_valuation())
}

/// Every section complete
pub fn completed_lot(lot: u64, plan: u64) -> LotSnapshot {
    valued_lot(lot, plan).with_compensation(settled_compensation(1))
}

/// Owner and land complete, valuation still a draft
pub fn half_done_lot(lot: u64, plan: u64) -> LotSnapshot {
    owner_only_lot(lot, plan)
        .with_land_details(complete_land())
        .with_valuation(ValuationRecord {
            status: ValuationStatus::Draft,
            assessment_date: None,
            ..approved_valuation()
        })
}

pub fn full_plan_header(plan: u64) -> PlanHeader {
    PlanHeader {
        plan_id: PlanId::new(plan),
        plan_identifier: Some(format!("PP/KL/{plan}")),
        section_07_gazette_no: Some("2201/14".into()),
        section_07_gazette_date: Some(date(2023, 4, 1)),
        section_38_gazette_no: Some("2250/3".into()),
        section_38_gazette_date: Some(date(2023, 9, 1)),
        section_5_gazette_no: Some("2190/7".into()),
        divisional_secretary: Some("Kalutara".into()),
    }
}

pub fn named_project_header(project: u64, name: &str) -> ProjectHeader {
    ProjectHeader {
        project_id: ProjectId::new(project),
        name: Some(name.to_string()),
        ..ProjectHeader::default()
    }
}
