//! Service layer for task lifecycle orchestration.
//!
//! Every mutating call validates its input, persists the task record, and
//! then brings the auxiliary views (resource entry, asset projection) in
//! line. The three stores are updated sequentially without a surrounding
//! transaction: a collaborator failure leaves earlier steps in place, and
//! the failure surfaces to the caller for out-of-band reconciliation.

use crate::task::{
    domain::{
        AssetContext, CompanyId, ExpirationDate, GroupId, NewTaskData, PageBounds, Scope,
        ScopeContext, Task, TaskChanges, TaskDomainError, TaskId, TaskStatus, TaskTitle, UserId,
        summary,
    },
    ports::{
        AssetHandle, AssetSync, AssetSyncError, AssetUpsert, Identity, IdentityError,
        IdentityResolver, ResourceGrant, ResourceScope, ResourceScopeError, TaskStore,
        TaskStoreError,
    },
};
use mockable::Clock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    actor_id: UserId,
    title: String,
    description: Option<String>,
    expiration_month: u32,
    expiration_day: u32,
    expiration_year: i32,
    assignee_id: UserId,
    completed: bool,
}

impl AddTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        actor_id: UserId,
        title: impl Into<String>,
        expiration_month: u32,
        expiration_day: u32,
        expiration_year: i32,
        assignee_id: UserId,
    ) -> Self {
        Self {
            actor_id,
            title: title.into(),
            description: None,
            expiration_month,
            expiration_day,
            expiration_year,
            assignee_id,
            completed: false,
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Request payload for updating a task's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    actor_id: UserId,
    task_id: TaskId,
    title: String,
    description: Option<String>,
    expiration_month: u32,
    expiration_day: u32,
    expiration_year: i32,
    assignee_id: UserId,
    completed: bool,
}

impl UpdateTaskRequest {
    /// Creates a request with the required update fields.
    #[must_use]
    pub fn new(
        actor_id: UserId,
        task_id: TaskId,
        title: impl Into<String>,
        expiration_month: u32,
        expiration_day: u32,
        expiration_year: i32,
        assignee_id: UserId,
    ) -> Self {
        Self {
            actor_id,
            task_id,
            title: title.into(),
            description: None,
            expiration_month,
            expiration_day,
            expiration_year,
            assignee_id,
            completed: false,
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the completion flag.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed before any side effect.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// No task in the group carries the UUID.
    #[error("task not found for uuid {uuid} in group {group_id}")]
    TaskUuidNotFound {
        /// Looked-up stable UUID.
        uuid: Uuid,
        /// Group the lookup was scoped to.
        group_id: GroupId,
    },

    /// The referenced actor or assignee does not exist.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// Identity lookup failed for infrastructure reasons.
    #[error(transparent)]
    Identity(IdentityError),

    /// Task store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),

    /// Resource scope operation failed.
    #[error(transparent)]
    Resource(#[from] ResourceScopeError),

    /// Asset synchronization failed.
    #[error(transparent)]
    Asset(#[from] AssetSyncError),
}

/// Result type for task lifecycle service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// One failed member of a best-effort bulk operation.
#[derive(Debug)]
pub struct BulkFailure {
    /// Task the member operation targeted.
    pub task_id: TaskId,
    /// Error the member operation failed with.
    pub error: TaskServiceError,
}

/// Outcome of a best-effort bulk deletion.
///
/// One member's failure does not block the remaining members; failed
/// members are collected here instead.
#[derive(Debug, Default)]
pub struct BulkDeleteReport {
    /// Tasks removed, with their resource and asset cleanup applied.
    pub deleted: Vec<Task>,
    /// Members that failed, in encounter order.
    pub failures: Vec<BulkFailure>,
}

impl BulkDeleteReport {
    /// Whether every member was deleted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a best-effort bulk asset reconciliation.
#[derive(Debug, Default)]
pub struct BulkSyncReport {
    /// Tasks whose projections were refreshed.
    pub synced: Vec<TaskId>,
    /// Members that failed, in encounter order.
    pub failures: Vec<BulkFailure>,
}

impl BulkSyncReport {
    /// Whether every projection was refreshed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskService<S, I, R, A, C>
where
    S: TaskStore,
    I: IdentityResolver,
    R: ResourceScope,
    A: AssetSync,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    identity: Arc<I>,
    resource: Arc<R>,
    asset: Arc<A>,
    clock: Arc<C>,
}

impl<S, I, R, A, C> TaskService<S, I, R, A, C>
where
    S: TaskStore,
    I: IdentityResolver,
    R: ResourceScope,
    A: AssetSync,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        identity: Arc<I>,
        resource: Arc<R>,
        asset: Arc<A>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            identity,
            resource,
            asset,
            clock,
        }
    }

    /// Creates a task under the acting context's scope.
    ///
    /// Resolves the actor and assignee, validates the title and expiration
    /// date, allocates an identifier, persists the record, grants its
    /// resource entry, and synchronizes its asset projection, in that
    /// order. Validation failures precede every side effect. A resource or
    /// asset failure after persistence leaves the stored task in place; the
    /// error surfaces for reconciliation rather than rolling the record
    /// back.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError`] when validation fails, a referenced
    /// user is unknown, or a collaborator rejects its step.
    pub async fn add_task(
        &self,
        request: AddTaskRequest,
        context: &ScopeContext,
    ) -> TaskServiceResult<Task> {
        let actor = self.resolve_user(request.actor_id).await?;
        self.resolve_user(request.assignee_id).await?;

        let title = TaskTitle::new(request.title)?;
        let expiration_date = ExpirationDate::from_parts(
            request.expiration_month,
            request.expiration_day,
            request.expiration_year,
        )?;

        let task_id = self.store.allocate_id().await?;
        let task = Task::create(
            NewTaskData {
                task_id,
                uuid: context.uuid.unwrap_or_else(Uuid::new_v4),
                company_id: actor.company_id,
                group_id: context.group_id,
                creator_id: actor.user_id,
                creator_name: actor.full_name,
                title,
                description: request.description,
                expiration_date,
                assignee_id: request.assignee_id,
                completed: request.completed,
            },
            &*self.clock,
        );

        self.store.store(&task).await?;

        self.resource
            .grant(ResourceGrant {
                company_id: task.company_id(),
                group_id: task.group_id(),
                actor_id: request.actor_id,
                task_id: task.task_id(),
            })
            .await?;

        self.sync_asset(request.actor_id, &task, &context.asset)
            .await?;

        info!(task_id = %task.task_id(), scope = %task.scope(), "task created");
        Ok(task)
    }

    /// Updates a task's mutable fields and refreshes its asset projection.
    ///
    /// The resource entry granted at creation is left untouched. The
    /// expiration date is reassembled and midnight-normalized exactly as on
    /// the creation path.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist, and otherwise the same failures as
    /// [`TaskService::add_task`].
    pub async fn update_task(
        &self,
        request: UpdateTaskRequest,
        context: &ScopeContext,
    ) -> TaskServiceResult<Task> {
        self.resolve_user(request.actor_id).await?;
        let mut task = self
            .store
            .find_by_id(request.task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(request.task_id))?;
        self.resolve_user(request.assignee_id).await?;

        let title = TaskTitle::new(request.title)?;
        let expiration_date = ExpirationDate::from_parts(
            request.expiration_month,
            request.expiration_day,
            request.expiration_year,
        )?;

        task.apply_update(
            TaskChanges {
                title,
                description: request.description,
                expiration_date,
                assignee_id: request.assignee_id,
                completed: request.completed,
            },
            &*self.clock,
        );

        self.store.update(&task).await?;
        self.sync_asset(request.actor_id, &task, &context.asset)
            .await?;

        info!(task_id = %task.task_id(), "task updated");
        Ok(task)
    }

    /// Deletes a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist, or a collaborator error when a cleanup step fails.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))?;
        self.delete_task_record(task).await
    }

    /// Deletes an already-loaded task record.
    ///
    /// Removes the durable record, revokes the resource entry, and removes
    /// the asset projection, in that order. A failing cleanup step leaves
    /// the earlier steps applied; the orphaned entry must be reconciled out
    /// of band.
    ///
    /// # Errors
    ///
    /// Returns the store, resource, or asset error of the first failing
    /// step.
    pub async fn delete_task_record(&self, task: Task) -> TaskServiceResult<Task> {
        self.store.remove(task.task_id()).await?;
        self.resource
            .revoke(task.company_id(), task.task_id())
            .await?;
        self.asset.remove(task.task_id()).await?;

        info!(task_id = %task.task_id(), "task deleted");
        Ok(task)
    }

    /// Deletes every task in a company/group scope, best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the scope listing itself
    /// fails; per-member failures are reported, not raised.
    pub async fn delete_group_tasks(&self, scope: Scope) -> TaskServiceResult<BulkDeleteReport> {
        let tasks = self
            .store
            .find_by_scope(scope, None, PageBounds::all())
            .await?;
        Ok(self.delete_all(tasks).await)
    }

    /// Deletes every task in a company where the user is the assignee or
    /// the creator, best-effort. Tasks matching both roles are deleted
    /// once.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when a listing fails;
    /// per-member failures are reported, not raised.
    pub async fn delete_user_tasks(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> TaskServiceResult<BulkDeleteReport> {
        let mut tasks = self.store.find_by_assignee(company_id, user_id).await?;
        let mut seen: HashSet<TaskId> = tasks.iter().map(Task::task_id).collect();
        for task in self.store.find_by_creator(company_id, user_id).await? {
            if seen.insert(task.task_id()) {
                tasks.push(task);
            }
        }
        Ok(self.delete_all(tasks).await)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn get_task(&self, task_id: TaskId) -> TaskServiceResult<Task> {
        self.store
            .find_by_id(task_id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(task_id))
    }

    /// Retrieves a task by stable UUID within a group.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskUuidNotFound`] when no task in the
    /// group carries the UUID.
    pub async fn get_task_by_uuid(&self, uuid: Uuid, group_id: GroupId) -> TaskServiceResult<Task> {
        self.store
            .find_by_uuid(uuid, group_id)
            .await?
            .ok_or(TaskServiceError::TaskUuidNotFound { uuid, group_id })
    }

    /// Lists the tasks in a scope, windowed by the page bounds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the listing fails.
    pub async fn get_tasks(&self, scope: Scope, bounds: PageBounds) -> TaskServiceResult<Vec<Task>> {
        Ok(self.store.find_by_scope(scope, None, bounds).await?)
    }

    /// Lists the tasks in a scope with the given workflow status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the listing fails.
    pub async fn get_tasks_with_status(
        &self,
        scope: Scope,
        status: TaskStatus,
        bounds: PageBounds,
    ) -> TaskServiceResult<Vec<Task>> {
        Ok(self.store.find_by_scope(scope, Some(status), bounds).await?)
    }

    /// Counts the tasks in a scope.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the count fails.
    pub async fn get_tasks_count(&self, scope: Scope) -> TaskServiceResult<u64> {
        Ok(self.store.count_by_scope(scope, None).await?)
    }

    /// Counts the tasks in a scope with the given workflow status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the count fails.
    pub async fn get_tasks_count_with_status(
        &self,
        scope: Scope,
        status: TaskStatus,
    ) -> TaskServiceResult<u64> {
        Ok(self.store.count_by_scope(scope, Some(status)).await?)
    }

    /// Creates or refreshes the asset projection of a task.
    ///
    /// Visibility follows the task's approval status; the search summary is
    /// the description shortened and stripped of markup. After the upsert,
    /// the projection's related-content links are replaced with the
    /// context's links.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Asset`] when the host subsystem rejects
    /// the upsert or the link update.
    pub async fn sync_asset(
        &self,
        actor_id: UserId,
        task: &Task,
        asset: &AssetContext,
    ) -> TaskServiceResult<AssetHandle> {
        let handle = self
            .asset
            .upsert(AssetUpsert {
                actor_id,
                group_id: task.group_id(),
                create_date: task.create_date(),
                modified_date: task.modified_date(),
                task_id: task.task_id(),
                uuid: task.uuid(),
                visible: task.status().is_approved(),
                category_ids: asset.category_ids.clone(),
                tag_names: asset.tag_names.clone(),
                title: task.title().as_str().to_owned(),
                description: task.description().map(str::to_owned),
                summary: summary::asset_summary(task.description()),
                priority: asset.priority,
            })
            .await?;
        self.asset
            .link_related(actor_id, handle, &asset.link_ids)
            .await?;
        Ok(handle)
    }

    /// Re-derives the asset projection of every task in a scope,
    /// best-effort.
    ///
    /// Repairs projections that drifted from their task records after a
    /// partial failure, without touching the records themselves.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Store`] when the scope listing fails;
    /// per-member failures are reported, not raised.
    pub async fn reconcile_group_assets(
        &self,
        actor_id: UserId,
        scope: Scope,
        asset: &AssetContext,
    ) -> TaskServiceResult<BulkSyncReport> {
        let tasks = self
            .store
            .find_by_scope(scope, None, PageBounds::all())
            .await?;

        let mut report = BulkSyncReport::default();
        for task in tasks {
            match self.sync_asset(actor_id, &task, asset).await {
                Ok(_) => report.synced.push(task.task_id()),
                Err(error) => {
                    warn!(task_id = %task.task_id(), %error, "asset reconciliation failed");
                    report.failures.push(BulkFailure {
                        task_id: task.task_id(),
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    async fn delete_all(&self, tasks: Vec<Task>) -> BulkDeleteReport {
        let mut report = BulkDeleteReport::default();
        for task in tasks {
            let task_id = task.task_id();
            match self.delete_task_record(task).await {
                Ok(deleted) => report.deleted.push(deleted),
                Err(error) => {
                    warn!(task_id = %task_id, %error, "bulk delete member failed");
                    report.failures.push(BulkFailure { task_id, error });
                }
            }
        }
        report
    }

    async fn resolve_user(&self, user_id: UserId) -> TaskServiceResult<Identity> {
        self.identity.resolve(user_id).await.map_err(|err| match err {
            IdentityError::UnknownUser(id) => TaskServiceError::UnknownUser(id),
            lookup @ IdentityError::Lookup(_) => TaskServiceError::Identity(lookup),
        })
    }
}
