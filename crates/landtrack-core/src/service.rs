//! Progress service
//!
//! Gathers snapshots from a [`SnapshotSource`] and runs them through the
//! engine. All I/O and all fallibility live here. The engine calls it
//! makes are pure.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::filter::LotFilter;
use crate::source::SnapshotSource;
use futures::stream::{self, StreamExt};
use landtrack_progress::{
    aggregate_plan_with_header, aggregate_project_with_header, LotProgress,
    LotProgressCalculator, PhaseDistribution, PlanProgress, ProjectProgress,
};
use landtrack_snapshot::{LotId, PlanHeader, PlanId, ProjectHeader, ProjectId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Plan progress together with the lots it was folded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    /// Plan aggregate
    pub plan: PlanProgress,
    /// Lot records, sorted by lot id
    pub lots: Vec<LotProgress>,
    /// Lots per phase
    pub distribution: PhaseDistribution,
}

/// Project progress together with its plan aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    /// Project aggregate
    pub project: ProjectProgress,
    /// Plan aggregates, sorted by plan id
    pub plans: Vec<PlanProgress>,
}

/// Computes progress records from a snapshot source
#[derive(Debug)]
pub struct ProgressService<S> {
    source: Arc<S>,
    config: EngineConfig,
    calculator: LotProgressCalculator,
}

impl<S: SnapshotSource> ProgressService<S> {
    /// Service with default configuration
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(Arc::new(source), EngineConfig::default())
    }

    /// Service with explicit configuration
    ///
    /// The configuration is expected to be validated already.
    #[must_use]
    pub fn with_config(source: Arc<S>, config: EngineConfig) -> Self {
        let calculator = config.calculator();
        Self {
            source,
            config,
            calculator,
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Underlying source
    #[inline]
    #[must_use]
    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Progress of one lot
    ///
    /// # Errors
    ///
    /// Propagates the source's fetch error.
    #[instrument(skip_all, fields(lot_id = %lot_id))]
    pub async fn lot_progress(&self, lot_id: LotId) -> Result<LotProgress> {
        let snapshot = self.source.fetch_lot(lot_id).await?;
        Ok(self.calculator.compute(&snapshot))
    }

    /// Progress of every lot in a plan, sorted by lot id
    ///
    /// Lots that fail to load are skipped with a warning. The call only
    /// fails when the plan is unknown or no lot at all could be loaded.
    ///
    /// # Errors
    ///
    /// Propagates membership errors and the last fetch error when every
    /// lot failed.
    #[instrument(skip_all, fields(plan_id = %plan_id))]
    pub async fn plan_lots(&self, plan_id: PlanId) -> Result<Vec<LotProgress>> {
        let ids = self.source.lots_in_plan(plan_id).await?;
        let requested = ids.len();

        let source = &self.source;
        let mut fetches = stream::iter(ids.into_iter().map(|lot_id| async move {
            let result = source.fetch_lot(lot_id).await;
            (lot_id, result)
        }))
        .buffer_unordered(self.config.fetch_concurrency.max(1));

        let mut lots = Vec::with_capacity(requested);
        let mut last_error = None;
        while let Some((lot_id, result)) = fetches.next().await {
            match result {
                Ok(snapshot) => lots.push(self.calculator.compute(&snapshot)),
                Err(error) => {
                    warn!(%plan_id, %lot_id, %error, "skipping lot that failed to load");
                    last_error = Some(error);
                }
            }
        }

        if lots.is_empty() {
            if let Some(error) = last_error {
                return Err(error);
            }
        }

        lots.sort_by_key(|lot| lot.lot_id);
        debug!(%plan_id, requested, loaded = lots.len(), "computed plan lots");
        Ok(lots)
    }

    /// Progress of a plan
    ///
    /// # Errors
    ///
    /// See [`ProgressService::plan_lots`].
    pub async fn plan_progress(&self, plan_id: PlanId) -> Result<PlanProgress> {
        self.plan_progress_filtered(plan_id, &LotFilter::default())
            .await
    }

    /// Progress of a plan over the lots a filter keeps
    ///
    /// # Errors
    ///
    /// See [`ProgressService::plan_lots`].
    pub async fn plan_progress_filtered(
        &self,
        plan_id: PlanId,
        filter: &LotFilter,
    ) -> Result<PlanProgress> {
        let lots = filter.apply(self.plan_lots(plan_id).await?);
        self.fold_plan(plan_id, &lots).await
    }

    /// Plan progress with its lots and phase distribution
    ///
    /// # Errors
    ///
    /// See [`ProgressService::plan_lots`].
    pub async fn plan_report(&self, plan_id: PlanId) -> Result<PlanReport> {
        self.plan_report_filtered(plan_id, &LotFilter::default())
            .await
    }

    /// Plan report restricted to the lots a filter keeps
    ///
    /// # Errors
    ///
    /// See [`ProgressService::plan_lots`].
    #[instrument(skip_all, fields(plan_id = %plan_id))]
    pub async fn plan_report_filtered(
        &self,
        plan_id: PlanId,
        filter: &LotFilter,
    ) -> Result<PlanReport> {
        let lots = filter.apply(self.plan_lots(plan_id).await?);
        let plan = self.fold_plan(plan_id, &lots).await?;
        let distribution = PhaseDistribution::from_lots(&lots);
        Ok(PlanReport {
            plan,
            lots,
            distribution,
        })
    }

    /// Progress of a project
    ///
    /// # Errors
    ///
    /// See [`ProgressService::project_report`].
    pub async fn project_progress(&self, project_id: ProjectId) -> Result<ProjectProgress> {
        Ok(self.project_report(project_id).await?.project)
    }

    /// Project progress with its plan aggregates
    ///
    /// Plans that fail to load are skipped with a warning, as lots are.
    ///
    /// # Errors
    ///
    /// Propagates membership errors and the last plan error when every
    /// plan failed.
    #[instrument(skip_all, fields(project_id = %project_id))]
    pub async fn project_report(&self, project_id: ProjectId) -> Result<ProjectReport> {
        let plan_ids = self.source.plans_in_project(project_id).await?;

        let mut plans = Vec::with_capacity(plan_ids.len());
        let mut last_error = None;
        for plan_id in plan_ids {
            match self.plan_progress(plan_id).await {
                Ok(plan) => plans.push(plan),
                Err(error) => {
                    warn!(%project_id, %plan_id, %error, "skipping plan that failed to load");
                    last_error = Some(error);
                }
            }
        }
        if plans.is_empty() {
            if let Some(error) = last_error {
                return Err(error);
            }
        }

        let header = if self.config.aggregation.uses_creation() {
            self.source.project_header(project_id).await?
        } else {
            None
        };
        let header = header.unwrap_or_else(|| ProjectHeader {
            project_id,
            ..ProjectHeader::default()
        });
        let project = aggregate_project_with_header(&header, &plans, self.config.aggregation);

        info!(
            %project_id,
            plans = plans.len(),
            progress = project.progress,
            status = %project.status,
            "computed project progress"
        );
        Ok(ProjectReport { project, plans })
    }

    async fn fold_plan(&self, plan_id: PlanId, lots: &[LotProgress]) -> Result<PlanProgress> {
        let header = if self.config.aggregation.uses_creation() {
            self.source.plan_header(plan_id).await?
        } else {
            None
        };
        let header = header.unwrap_or_else(|| PlanHeader {
            plan_id,
            ..PlanHeader::default()
        });
        Ok(aggregate_plan_with_header(
            &header,
            lots,
            self.config.aggregation,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemorySource;
    use landtrack_progress::{AggregateStatus, LotPhase};
    use landtrack_test_utils::{completed_lot, empty_lot, owner_only_lot};

    fn source() -> InMemorySource {
        let source = InMemorySource::new();
        source.insert_lot(empty_lot(3, 1));
        source.insert_lot(completed_lot(1, 1));
        source.insert_lot(owner_only_lot(2, 1));
        source
    }

    #[tokio::test]
    async fn plan_lots_sorted_by_id() {
        let service = ProgressService::new(source());
        let lots = service.plan_lots(PlanId::new(1)).await.unwrap();
        let ids: Vec<u64> = lots.iter().map(|l| l.lot_id.get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn plan_report_counts_phases() {
        let service = ProgressService::new(source());
        let report = service.plan_report(PlanId::new(1)).await.unwrap();
        // (100 + 25 + 0) / 3 = 41.67
        assert_eq!(report.plan.progress, 42);
        assert_eq!(report.plan.completed_count, 1);
        assert_eq!(report.plan.status, AggregateStatus::InProgress);
        assert_eq!(report.distribution.count(LotPhase::Completed), 1);
        assert_eq!(report.distribution.count(LotPhase::LandDetails), 1);
        assert_eq!(report.distribution.count(LotPhase::OwnerDetails), 1);
    }

    #[tokio::test]
    async fn filtered_plan_folds_subset() {
        let service = ProgressService::new(source());
        let filter = LotFilter::new().with_percent_range(Some(1), None);
        let plan = service
            .plan_progress_filtered(PlanId::new(1), &filter)
            .await
            .unwrap();
        assert_eq!(plan.total_count, 2);
        assert_eq!(plan.progress, 63); // (100 + 25) / 2 = 62.5
    }

    #[tokio::test]
    async fn concurrency_of_one_gives_same_result() {
        let source = Arc::new(source());
        let serial = ProgressService::with_config(
            Arc::clone(&source),
            EngineConfig::new().with_fetch_concurrency(1),
        );
        let parallel = ProgressService::with_config(source, EngineConfig::new());
        assert_eq!(
            serial.plan_report(PlanId::new(1)).await.unwrap(),
            parallel.plan_report(PlanId::new(1)).await.unwrap()
        );
    }
}
