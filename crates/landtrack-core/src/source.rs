//! Snapshot sources
//!
//! The engine never reads the store directly. A [`SnapshotSource`] hands it
//! point-in-time lot snapshots plus the plan/project membership needed to
//! fold them. [`InMemorySource`] keeps everything in concurrent maps and can
//! be loaded from a JSON bundle.

use crate::error::{EngineError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use landtrack_snapshot::{LotId, LotSnapshot, PlanHeader, PlanId, ProjectHeader, ProjectId};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Supplies lot snapshots and hierarchy membership
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Snapshot of one lot
    async fn fetch_lot(&self, lot_id: LotId) -> Result<LotSnapshot>;

    /// Lots belonging to a plan
    async fn lots_in_plan(&self, plan_id: PlanId) -> Result<Vec<LotId>>;

    /// Plans belonging to a project
    async fn plans_in_project(&self, project_id: ProjectId) -> Result<Vec<PlanId>>;

    /// Registration fields of a plan, if known
    async fn plan_header(&self, _plan_id: PlanId) -> Result<Option<PlanHeader>> {
        Ok(None)
    }

    /// Registration fields of a project, if known
    async fn project_header(&self, _project_id: ProjectId) -> Result<Option<ProjectHeader>> {
        Ok(None)
    }
}

#[async_trait]
impl<S: SnapshotSource + ?Sized> SnapshotSource for Arc<S> {
    async fn fetch_lot(&self, lot_id: LotId) -> Result<LotSnapshot> {
        (**self).fetch_lot(lot_id).await
    }

    async fn lots_in_plan(&self, plan_id: PlanId) -> Result<Vec<LotId>> {
        (**self).lots_in_plan(plan_id).await
    }

    async fn plans_in_project(&self, project_id: ProjectId) -> Result<Vec<PlanId>> {
        (**self).plans_in_project(project_id).await
    }

    async fn plan_header(&self, plan_id: PlanId) -> Result<Option<PlanHeader>> {
        (**self).plan_header(plan_id).await
    }

    async fn project_header(&self, project_id: ProjectId) -> Result<Option<ProjectHeader>> {
        (**self).project_header(project_id).await
    }
}

/// Plan entry of a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Owning project, if any
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Registration fields
    pub header: PlanHeader,
}

/// Serialized contents of an [`InMemorySource`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bundle {
    /// Projects
    pub projects: Vec<ProjectHeader>,
    /// Plans
    pub plans: Vec<PlanEntry>,
    /// Lot snapshots
    pub lots: Vec<LotSnapshot>,
}

#[derive(Debug, Clone)]
struct PlanSlot {
    project_id: Option<ProjectId>,
    header: PlanHeader,
}

/// Snapshot source held in memory
#[derive(Debug, Default)]
pub struct InMemorySource {
    lots: DashMap<LotId, LotSnapshot>,
    plans: DashMap<PlanId, PlanSlot>,
    projects: DashMap<ProjectId, ProjectHeader>,
}

impl InMemorySource {
    /// Create empty source
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Source holding a bundle's contents
    #[must_use]
    pub fn from_bundle(bundle: Bundle) -> Self {
        let source = Self::new();
        for header in bundle.projects {
            source.insert_project(header);
        }
        for entry in bundle.plans {
            source.insert_plan(entry.project_id, entry.header);
        }
        for lot in bundle.lots {
            source.insert_lot(lot);
        }
        tracing::debug!(
            projects = source.projects.len(),
            plans = source.plans.len(),
            lots = source.lots.len(),
            "loaded bundle"
        );
        source
    }

    /// Decode a JSON bundle
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Decode`] for malformed JSON. Malformed money
    /// and date fields inside records do not fail; they coerce.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let bundle: Bundle = serde_json::from_str(raw)?;
        Ok(Self::from_bundle(bundle))
    }

    /// Read and decode a JSON bundle file
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Io`] or [`EngineError::Decode`].
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json_str(&raw)
    }

    /// Write the contents as a pretty-printed JSON bundle
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Decode`] if encoding fails or
    /// [`EngineError::Io`] if the file cannot be written.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.to_bundle())?;
        tokio::fs::write(path.as_ref(), raw).await?;
        tracing::debug!(path = %path.as_ref().display(), lots = self.lots.len(), "saved bundle");
        Ok(())
    }

    /// Insert or replace a lot snapshot
    ///
    /// Its plan is registered on the fly when unknown.
    pub fn insert_lot(&self, snapshot: LotSnapshot) {
        self.plans
            .entry(snapshot.plan_id)
            .or_insert_with(|| PlanSlot {
                project_id: None,
                header: PlanHeader {
                    plan_id: snapshot.plan_id,
                    ..PlanHeader::default()
                },
            });
        self.lots.insert(snapshot.lot_id, snapshot);
    }

    /// Insert or replace a plan
    pub fn insert_plan(&self, project_id: Option<ProjectId>, header: PlanHeader) {
        self.plans
            .insert(header.plan_id, PlanSlot { project_id, header });
    }

    /// Insert or replace a project
    pub fn insert_project(&self, header: ProjectHeader) {
        self.projects.insert(header.project_id, header);
    }

    /// Number of lots held
    #[inline]
    #[must_use]
    pub fn lot_count(&self) -> usize {
        self.lots.len()
    }

    /// Contents as a bundle, sorted by id
    #[must_use]
    pub fn to_bundle(&self) -> Bundle {
        let mut projects: Vec<_> = self.projects.iter().map(|p| p.value().clone()).collect();
        projects.sort_by_key(|p| p.project_id);
        let mut plans: Vec<_> = self
            .plans
            .iter()
            .map(|p| PlanEntry {
                project_id: p.project_id,
                header: p.header.clone(),
            })
            .collect();
        plans.sort_by_key(|p| p.header.plan_id);
        let mut lots: Vec<_> = self.lots.iter().map(|l| l.value().clone()).collect();
        lots.sort_by_key(|l| l.lot_id);
        Bundle {
            projects,
            plans,
            lots,
        }
    }
}

#[async_trait]
impl SnapshotSource for InMemorySource {
    async fn fetch_lot(&self, lot_id: LotId) -> Result<LotSnapshot> {
        self.lots
            .get(&lot_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| EngineError::lot_not_found(lot_id))
    }

    async fn lots_in_plan(&self, plan_id: PlanId) -> Result<Vec<LotId>> {
        if !self.plans.contains_key(&plan_id) {
            return Err(EngineError::plan_not_found(plan_id));
        }
        let mut ids: Vec<LotId> = self
            .lots
            .iter()
            .filter(|entry| entry.plan_id == plan_id)
            .map(|entry| *entry.key())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn plans_in_project(&self, project_id: ProjectId) -> Result<Vec<PlanId>> {
        if !self.projects.contains_key(&project_id) {
            return Err(EngineError::project_not_found(project_id));
        }
        let mut ids: Vec<PlanId> = self
            .plans
            .iter()
            .filter(|entry| entry.project_id == Some(project_id))
            .map(|entry| *entry.key())
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn plan_header(&self, plan_id: PlanId) -> Result<Option<PlanHeader>> {
        Ok(self.plans.get(&plan_id).map(|slot| slot.header.clone()))
    }

    async fn project_header(&self, project_id: ProjectId) -> Result<Option<ProjectHeader>> {
        Ok(self.projects.get(&project_id).map(|p| p.value().clone()))
    }
}
