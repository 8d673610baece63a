//! Asset port for the searchable projection of a task.

use crate::task::domain::{AssetCategoryId, AssetLinkId, GroupId, TaskId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for asset synchronization operations.
pub type AssetSyncResult<T> = Result<T, AssetSyncError>;

/// Handle to an asset entry inside the host's asset subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetHandle(i64);

impl AssetHandle {
    /// Wraps a raw asset entry identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full projection payload for an asset upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetUpsert {
    /// User performing the synchronization.
    pub actor_id: UserId,
    /// Group the projection is scoped to.
    pub group_id: GroupId,
    /// Creation timestamp of the projected task.
    pub create_date: DateTime<Utc>,
    /// Last-mutation timestamp of the projected task.
    pub modified_date: DateTime<Utc>,
    /// Task the projection mirrors.
    pub task_id: TaskId,
    /// Stable UUID of the projected task.
    pub uuid: Uuid,
    /// Whether the projection is discoverable/searchable.
    pub visible: bool,
    /// Category identifiers attached to the projection.
    pub category_ids: Vec<AssetCategoryId>,
    /// Tag names attached to the projection.
    pub tag_names: Vec<String>,
    /// Projected title.
    pub title: String,
    /// Projected description.
    pub description: Option<String>,
    /// Plain-text search summary derived from the description.
    pub summary: String,
    /// Search priority, when ranked.
    pub priority: Option<f64>,
}

/// Denormalized searchable projection contract.
///
/// Exactly one projection exists per persisted task; it is created or
/// refreshed on every add/update and removed on delete.
#[async_trait]
pub trait AssetSync: Send + Sync {
    /// Creates or refreshes the projection of a task.
    ///
    /// # Errors
    ///
    /// Returns [`AssetSyncError::Upsert`] when the host subsystem rejects
    /// the projection.
    async fn upsert(&self, projection: AssetUpsert) -> AssetSyncResult<AssetHandle>;

    /// Replaces the related-content links of a projection.
    ///
    /// # Errors
    ///
    /// Returns [`AssetSyncError::Link`] when the host subsystem fails to
    /// record the links.
    async fn link_related(
        &self,
        actor_id: UserId,
        handle: AssetHandle,
        link_ids: &[AssetLinkId],
    ) -> AssetSyncResult<()>;

    /// Removes the projection of a deleted task.
    ///
    /// # Errors
    ///
    /// Returns [`AssetSyncError::Remove`] when the host subsystem fails to
    /// drop the projection.
    async fn remove(&self, task_id: TaskId) -> AssetSyncResult<()>;
}

/// Errors returned by asset synchronization implementations.
#[derive(Debug, Clone, Error)]
pub enum AssetSyncError {
    /// Creating or refreshing the projection failed.
    #[error("asset upsert failed: {0}")]
    Upsert(Arc<dyn std::error::Error + Send + Sync>),

    /// Recording related links failed.
    #[error("asset link update failed: {0}")]
    Link(Arc<dyn std::error::Error + Send + Sync>),

    /// Removing the projection failed.
    #[error("asset removal failed: {0}")]
    Remove(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssetSyncError {
    /// Wraps an upsert failure.
    pub fn upsert(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Upsert(Arc::new(err))
    }

    /// Wraps a link failure.
    pub fn link(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Link(Arc::new(err))
    }

    /// Wraps a removal failure.
    pub fn remove(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Remove(Arc::new(err))
    }
}
