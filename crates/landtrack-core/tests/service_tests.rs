use async_trait::async_trait;
use landtrack_core::prelude::*;
use landtrack_core::Result;
use landtrack_snapshot::{LotId, LotSnapshot, PlanHeader, PlanId, ProjectHeader, ProjectId};
use landtrack_test_utils::{
    completed_lot, empty_lot, full_plan_header, named_project_header, owner_only_lot, valued_lot,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;

fn project_source() -> InMemorySource {
    let source = InMemorySource::new();
    source.insert_project(named_project_header(1, "Southern bypass"));
    source.insert_plan(Some(ProjectId::new(1)), full_plan_header(10));
    source.insert_plan(Some(ProjectId::new(1)), full_plan_header(20));

    // Plan 10: 0% and 100% -> 50
    source.insert_lot(empty_lot(101, 10));
    source.insert_lot(completed_lot(102, 10));
    // Plan 20: 100% -> 100
    source.insert_lot(completed_lot(201, 20));
    source
}

/// Wraps an in-memory source and fails fetches for chosen lots
struct FlakySource {
    inner: InMemorySource,
    failing: HashSet<LotId>,
}

#[async_trait]
impl SnapshotSource for FlakySource {
    async fn fetch_lot(&self, lot_id: LotId) -> Result<LotSnapshot> {
        if self.failing.contains(&lot_id) {
            return Err(EngineError::SourceUnavailable(format!("lot {lot_id} timed out")));
        }
        self.inner.fetch_lot(lot_id).await
    }

    async fn lots_in_plan(&self, plan_id: PlanId) -> Result<Vec<LotId>> {
        self.inner.lots_in_plan(plan_id).await
    }

    async fn plans_in_project(&self, project_id: ProjectId) -> Result<Vec<PlanId>> {
        self.inner.plans_in_project(project_id).await
    }

    async fn plan_header(&self, plan_id: PlanId) -> Result<Option<PlanHeader>> {
        self.inner.plan_header(plan_id).await
    }

    async fn project_header(&self, project_id: ProjectId) -> Result<Option<ProjectHeader>> {
        self.inner.project_header(project_id).await
    }
}

#[tokio::test]
async fn test_project_scenario_e() {
    let service = ProgressService::new(project_source());

    let report = service.project_report(ProjectId::new(1)).await.unwrap();
    let plan_progress: Vec<u8> = report.plans.iter().map(|p| p.progress).collect();
    assert_eq!(plan_progress, vec![50, 100]);
    assert_eq!(report.project.progress, 75);
    assert_eq!(report.project.completed_count, 1);
    assert_eq!(report.project.status, AggregateStatus::InProgress);
}

#[tokio::test]
async fn test_lot_progress_through_service() {
    let service = ProgressService::new(project_source());
    let lot = service.lot_progress(LotId::new(102)).await.unwrap();
    assert_eq!(lot.overall_percent, 100);
    assert_eq!(format_message(&lot), "All sections completed! 🎉");

    let err = service.lot_progress(LotId::new(999)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_failed_lot_is_skipped() {
    let source = FlakySource {
        inner: project_source(),
        failing: HashSet::from([LotId::new(101)]),
    };
    let service = ProgressService::new(source);

    let plan = service.plan_progress(PlanId::new(10)).await.unwrap();
    assert_eq!(plan.total_count, 1);
    assert_eq!(plan.progress, 100);
}

#[tokio::test]
async fn test_all_lots_failing_is_error() {
    let source = FlakySource {
        inner: project_source(),
        failing: HashSet::from([LotId::new(101), LotId::new(102)]),
    };
    let service = ProgressService::new(source);

    let err = service.plan_progress(PlanId::new(10)).await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_empty_plan_is_not_started() {
    let source = project_source();
    source.insert_plan(Some(ProjectId::new(1)), full_plan_header(30));
    let service = ProgressService::new(source);

    let plan = service.plan_progress(PlanId::new(30)).await.unwrap();
    assert_eq!(plan.progress, 0);
    assert_eq!(plan.status, AggregateStatus::NotStarted);

    // The empty plan now drags the project mean down: (50 + 100 + 0) / 3
    let project = service.project_progress(ProjectId::new(1)).await.unwrap();
    assert_eq!(project.progress, 50);
}

#[tokio::test]
async fn test_creation_weighting_from_config() {
    let config = EngineConfig::from_toml_str("[aggregation]\ncreation_weight_percent = 10").unwrap();
    let service = ProgressService::with_config(Arc::new(project_source()), config);

    // Full header: 1.0 * 10 + 50 * 0.9 = 55
    let plan = service.plan_progress(PlanId::new(10)).await.unwrap();
    assert_eq!(plan.progress, 55);
    assert_eq!(plan.creation_score, Some(1.0));
}

#[tokio::test]
async fn test_filtered_plan_report() {
    let source = InMemorySource::new();
    source.insert_lot(empty_lot(1, 5));
    source.insert_lot(owner_only_lot(2, 5));
    source.insert_lot(valued_lot(3, 5));
    source.insert_lot(completed_lot(4, 5));
    let service = ProgressService::new(source);

    let filter = LotFilter::new().with_phase(LotPhase::Compensation);
    let report = service
        .plan_report_filtered(PlanId::new(5), &filter)
        .await
        .unwrap();
    assert_eq!(report.lots.len(), 1);
    assert_eq!(report.plan.progress, 75);
    assert_eq!(report.distribution.count(LotPhase::Compensation), 1);
    assert_eq!(report.distribution.total(), 1);
}

#[tokio::test]
async fn test_last_completed_naming_from_config() {
    let source = InMemorySource::new();
    source.insert_lot(valued_lot(3, 5));
    let config = EngineConfig::new().with_phase_naming(PhaseNaming::LastCompleted);
    let service = ProgressService::with_config(Arc::new(source), config);

    let lot = service.lot_progress(LotId::new(3)).await.unwrap();
    assert_eq!(lot.status, LotPhase::Valuation);
}

#[tokio::test]
async fn test_bundle_round_trip() {
    let bundle = project_source().to_bundle();
    let json = serde_json::to_string(&bundle).unwrap();
    let service = ProgressService::new(InMemorySource::from_json_str(&json).unwrap());

    let project = service.project_progress(ProjectId::new(1)).await.unwrap();
    assert_eq!(project.progress, 75);
}
