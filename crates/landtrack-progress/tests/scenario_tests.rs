use landtrack_progress::{
    aggregate_plan, aggregate_project, compute_lot_progress, format_message, next_action,
    AggregateStatus, LotPhase, LotProgressCalculator, PhaseNaming, Section, SectionStatus,
    CELEBRATION, READY_TO_START,
};
use landtrack_snapshot::{Amount, PlanId, ProjectId, ValuationRecord};
use landtrack_test_utils::{
    approved_valuation, completed_lot, empty_lot, half_done_lot, half_settled_compensation,
    owner_only_lot, settled_compensation, valued_lot,
};
use pretty_assertions::assert_eq;

fn statuses(lp: &landtrack_progress::LotProgress) -> Vec<SectionStatus> {
    lp.sections.iter().map(|s| s.status).collect()
}

#[test]
fn test_scenario_a_no_owners() {
    let lp = compute_lot_progress(&empty_lot(1, 1));

    assert_eq!(
        statuses(&lp),
        vec![
            SectionStatus::NotStarted,
            SectionStatus::Blocked,
            SectionStatus::Blocked,
            SectionStatus::Blocked,
        ]
    );
    assert_eq!(lp.overall_percent, 0);
    assert_eq!(lp.status, LotPhase::OwnerDetails);
    assert_eq!(format_message(&lp), READY_TO_START);
}

#[test]
fn test_scenario_b_owner_only() {
    let lp = compute_lot_progress(&owner_only_lot(2, 1));

    assert_eq!(lp.overall_percent, 25);
    assert_eq!(lp.last_completed_section, Some(Section::OwnerDetails));
    assert_eq!(lp.status, LotPhase::LandDetails);
    assert_eq!(lp.stopped_at, Some(Section::LandDetails));
    // Land has no data of its own yet, so it is not blocked
    assert_eq!(lp.sections[1].status, SectionStatus::NotStarted);
    assert_eq!(lp.sections[2].status, SectionStatus::Blocked);
}

#[test]
fn test_scenario_c_half_reconciled_compensation() {
    let lp = compute_lot_progress(&valued_lot(3, 1).with_compensation(half_settled_compensation(1)));

    let compensation = lp.section(Section::Compensation).unwrap();
    assert_eq!(compensation.status, SectionStatus::Partial);
    assert_eq!(compensation.completeness, 0.5);
    assert_eq!(compensation.missing, vec!["interest reconciliation".to_string()]);

    // 75 + 12.5 rounds half away from zero
    assert_eq!(lp.overall_percent, 88);
    assert_eq!(lp.last_completed_section, Some(Section::Valuation));
    assert_eq!(lp.status, LotPhase::Compensation);
    assert_eq!(lp.status_message, "Missing: interest reconciliation");
    assert_eq!(
        format_message(&lp),
        "88% complete — Missing: interest reconciliation"
    );
    assert_eq!(next_action(&lp.sections), "Add interest reconciliation");

    let agg = lp.aggregates.compensation;
    assert_eq!(agg.total_records, 1);
    assert_eq!(agg.with_amount, 1);
    assert_eq!(agg.with_zero_balance, 1);
    assert_eq!(agg.with_interest_complete, 0);
    assert_eq!(agg.fully_complete, 0);
}

#[test]
fn test_scenario_c_last_completed_naming() {
    let snap = valued_lot(3, 1).with_compensation(half_settled_compensation(1));
    let lp = LotProgressCalculator::with_naming(PhaseNaming::LastCompleted).compute(&snap);
    assert_eq!(lp.status, LotPhase::Valuation);
    assert_eq!(lp.overall_percent, 88);
}

#[test]
fn test_scenario_d_plan_mean() {
    let lots = [
        compute_lot_progress(&empty_lot(1, 4)),
        compute_lot_progress(&half_done_lot(2, 4)),
        compute_lot_progress(&completed_lot(3, 4)),
    ];
    // Draft valuation with amounts only is one criterion of three
    assert_eq!(lots[1].overall_percent, 58);

    let lots = [
        compute_lot_progress(&empty_lot(1, 4)),
        compute_lot_progress(&owner_only_lot(2, 4).with_land_details(landtrack_test_utils::complete_land())),
        compute_lot_progress(&completed_lot(3, 4)),
    ];
    assert_eq!(
        lots.iter().map(|l| l.overall_percent).collect::<Vec<_>>(),
        vec![0, 50, 100]
    );

    let plan = aggregate_plan(PlanId::new(4), &lots);
    assert_eq!(plan.progress, 50);
    assert_eq!(plan.completed_count, 1);
    assert_eq!(plan.total_count, 3);
    assert_eq!(plan.status, AggregateStatus::InProgress);
}

#[test]
fn test_scenario_e_project_mean() {
    let half = aggregate_plan(
        PlanId::new(1),
        &[
            compute_lot_progress(&empty_lot(1, 1)),
            compute_lot_progress(&completed_lot(2, 1)),
        ],
    );
    let full = aggregate_plan(PlanId::new(2), &[compute_lot_progress(&completed_lot(3, 2))]);
    assert_eq!((half.progress, full.progress), (50, 100));
    assert_eq!(full.status, AggregateStatus::Completed);

    let project = aggregate_project(ProjectId::new(1), &[half, full]);
    assert_eq!(project.progress, 75);
    assert_eq!(project.completed_count, 1);
    assert_eq!(project.status, AggregateStatus::InProgress);
}

#[test]
fn test_valuation_components_without_total_stay_partial() {
    let snap = valued_lot(7, 1)
        .with_valuation(ValuationRecord {
            total_value: Amount::ZERO,
            ..approved_valuation()
        })
        .with_compensation(settled_compensation(1));
    let lp = compute_lot_progress(&snap);

    assert_eq!(
        statuses(&lp),
        vec![
            SectionStatus::Complete,
            SectionStatus::Complete,
            SectionStatus::Partial,
            SectionStatus::Blocked,
        ]
    );
    // 50 + 25 * (0.5 + 1 + 1) / 3 = 70.83
    assert_eq!(lp.overall_percent, 71);
    assert_eq!(lp.last_completed_section, Some(Section::LandDetails));
    assert_eq!(lp.status, LotPhase::Valuation);
    assert_eq!(
        lp.section(Section::Valuation).unwrap().missing,
        vec!["total value".to_string()]
    );
}

#[test]
fn test_valuation_dated_and_approved_without_amounts() {
    let snap = valued_lot(8, 1).with_valuation(ValuationRecord {
        assessment_date: approved_valuation().assessment_date,
        status: approved_valuation().status,
        ..ValuationRecord::default()
    });
    let lp = compute_lot_progress(&snap);

    let valuation = lp.section(Section::Valuation).unwrap();
    assert_eq!(valuation.status, SectionStatus::Partial);
    assert_eq!(valuation.missing, vec!["total value".to_string()]);
    // 50 + 25 * 2 / 3 = 66.67
    assert_eq!(lp.overall_percent, 67);
}

#[test]
fn test_completed_lot() {
    let lp = compute_lot_progress(&completed_lot(9, 1));
    assert_eq!(lp.overall_percent, 100);
    assert_eq!(lp.status, LotPhase::Completed);
    assert_eq!(lp.stopped_at, None);
    assert_eq!(format_message(&lp), CELEBRATION);
    assert_eq!(next_action(&lp.sections), "All done!");
    assert_eq!(lp.last_activity, Some(landtrack_test_utils::date(2024, 6, 30)));
}

#[test]
fn test_empty_project() {
    let project = aggregate_project(ProjectId::new(1), &[]);
    assert_eq!(project.progress, 0);
    assert_eq!(project.status, AggregateStatus::NotStarted);
}

#[test]
fn test_lot_progress_json_shape() {
    let lp = compute_lot_progress(&owner_only_lot(2, 1));
    let json = serde_json::to_value(&lp).unwrap();
    assert_eq!(json["status"], "Land Details");
    assert_eq!(json["last_completed_section"], "Owner Details");
    assert_eq!(json["sections"][0]["name"], "Owner Details");
    assert_eq!(json["sections"][0]["status"], "complete");
    assert_eq!(json["sections"][2]["status"], "blocked");
    assert_eq!(json["aggregates"]["compensation"]["total_records"], 0);
}
