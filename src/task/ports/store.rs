//! Store port for task persistence, lookup, and scoped queries.

use crate::task::domain::{CompanyId, GroupId, PageBounds, Scope, Task, TaskId, TaskStatus, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Listing operations make no ordering guarantee beyond stability under no
/// concurrent writes; implementations here order by task identifier.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Allocates the next task identifier from the store's monotonic
    /// sequence. Allocated identifiers are never reused, even when the
    /// task they were intended for is never stored.
    async fn allocate_id(&self) -> TaskStoreResult<TaskId>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the task identifier
    /// already exists.
    async fn store(&self, task: &Task) -> TaskStoreResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskStoreResult<()>;

    /// Removes a task record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn remove(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Finds a task by stable UUID within a group.
    ///
    /// Returns `None` when no task in the group carries the UUID.
    async fn find_by_uuid(&self, uuid: Uuid, group_id: GroupId)
    -> TaskStoreResult<Option<Task>>;

    /// Returns the tasks in a scope, optionally restricted to a workflow
    /// status, windowed by the given page bounds.
    async fn find_by_scope(
        &self,
        scope: Scope,
        status: Option<TaskStatus>,
        bounds: PageBounds,
    ) -> TaskStoreResult<Vec<Task>>;

    /// Counts the tasks in a scope, optionally restricted to a workflow
    /// status.
    async fn count_by_scope(
        &self,
        scope: Scope,
        status: Option<TaskStatus>,
    ) -> TaskStoreResult<u64>;

    /// Returns every task in a company created by the given user.
    async fn find_by_creator(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> TaskStoreResult<Vec<Task>>;

    /// Returns every task in a company assigned to the given user.
    async fn find_by_assignee(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> TaskStoreResult<Vec<Task>>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
