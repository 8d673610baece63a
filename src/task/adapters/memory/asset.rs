//! In-memory asset projection registry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{AssetLinkId, TaskId, UserId},
    ports::{AssetHandle, AssetSync, AssetSyncError, AssetSyncResult, AssetUpsert},
};

/// One projection recorded by [`InMemoryAssetSync`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    /// Handle allocated for the projection.
    pub handle: AssetHandle,
    /// Last projection payload received.
    pub projection: AssetUpsert,
    /// Current related-content links.
    pub links: Vec<AssetLinkId>,
}

/// In-memory asset subsystem keeping one projection per task.
///
/// Upserting an already-projected task keeps its handle; removing an absent
/// projection is a no-op, matching hosts that treat removal as idempotent.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetSync {
    state: Arc<RwLock<InMemoryAssetState>>,
}

#[derive(Debug, Default)]
struct InMemoryAssetState {
    entries: HashMap<TaskId, AssetEntry>,
    last_handle: i64,
}

impl InMemoryAssetSync {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded projection of a task, if any.
    #[must_use]
    pub fn entry(&self, task_id: TaskId) -> Option<AssetEntry> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.entries.get(&task_id).cloned())
    }

    /// Whether a task currently has a projection.
    #[must_use]
    pub fn contains(&self, task_id: TaskId) -> bool {
        self.state
            .read()
            .is_ok_and(|state| state.entries.contains_key(&task_id))
    }

    /// Returns the number of recorded projections.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.entries.len())
    }
}

#[async_trait]
impl AssetSync for InMemoryAssetSync {
    async fn upsert(&self, projection: AssetUpsert) -> AssetSyncResult<AssetHandle> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AssetSyncError::upsert(std::io::Error::other(err.to_string())))?;

        let task_id = projection.task_id;
        if let Some(existing) = state.entries.get_mut(&task_id) {
            existing.projection = projection;
            return Ok(existing.handle);
        }

        state.last_handle += 1;
        let handle = AssetHandle::new(state.last_handle);
        state.entries.insert(
            task_id,
            AssetEntry {
                handle,
                projection,
                links: Vec::new(),
            },
        );
        Ok(handle)
    }

    async fn link_related(
        &self,
        _actor_id: UserId,
        handle: AssetHandle,
        link_ids: &[AssetLinkId],
    ) -> AssetSyncResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AssetSyncError::link(std::io::Error::other(err.to_string())))?;
        let entry = state
            .entries
            .values_mut()
            .find(|entry| entry.handle == handle)
            .ok_or_else(|| {
                AssetSyncError::link(std::io::Error::other(format!("unknown asset handle {handle}")))
            })?;
        entry.links = link_ids.to_vec();
        Ok(())
    }

    async fn remove(&self, task_id: TaskId) -> AssetSyncResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| AssetSyncError::remove(std::io::Error::other(err.to_string())))?;
        state.entries.remove(&task_id);
        Ok(())
    }
}
