//! In-memory resource entry registry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{CompanyId, TaskId},
    ports::{ResourceGrant, ResourceScope, ResourceScopeError, ResourceScopeResult},
};

/// In-memory resource scope keeping one entry per task.
///
/// Revoking an absent entry is a no-op, matching host subsystems that treat
/// resource deletion as idempotent.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceScope {
    entries: Arc<RwLock<HashMap<TaskId, ResourceGrant>>>,
}

impl InMemoryResourceScope {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a task currently holds a resource entry.
    #[must_use]
    pub fn is_granted(&self, task_id: TaskId) -> bool {
        self.entries
            .read()
            .is_ok_and(|entries| entries.contains_key(&task_id))
    }

    /// Returns the entry recorded for a task, if any.
    #[must_use]
    pub fn grant_for(&self, task_id: TaskId) -> Option<ResourceGrant> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(&task_id).copied())
    }

    /// Returns the number of recorded entries.
    #[must_use]
    pub fn grant_count(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }
}

#[async_trait]
impl ResourceScope for InMemoryResourceScope {
    async fn grant(&self, grant: ResourceGrant) -> ResourceScopeResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| ResourceScopeError::grant(std::io::Error::other(err.to_string())))?;
        entries.insert(grant.task_id, grant);
        Ok(())
    }

    async fn revoke(&self, _company_id: CompanyId, task_id: TaskId) -> ResourceScopeResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| ResourceScopeError::revoke(std::io::Error::other(err.to_string())))?;
        entries.remove(&task_id);
        Ok(())
    }
}
