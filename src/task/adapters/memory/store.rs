//! Thread-safe in-memory task store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::task::{
    domain::{CompanyId, GroupId, PageBounds, Scope, Task, TaskId, TaskStatus, UserId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// In-memory task store backed by an ordered map and a local id sequence.
///
/// Listing operations return tasks ordered by identifier, which keeps
/// pagination stable under no concurrent writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryStoreState>>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskStoreResult<std::sync::RwLockReadGuard<'_, InMemoryStoreState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<std::sync::RwLockWriteGuard<'_, InMemoryStoreState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

fn in_scope(task: &Task, scope: Scope, status: Option<TaskStatus>) -> bool {
    task.company_id() == scope.company_id
        && task.group_id() == scope.group_id
        && status.is_none_or(|wanted| task.status() == wanted)
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn allocate_id(&self) -> TaskStoreResult<TaskId> {
        let mut state = self.write()?;
        state.last_id += 1;
        Ok(TaskId::new(state.last_id))
    }

    async fn store(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.task_id()) {
            return Err(TaskStoreError::DuplicateTask(task.task_id()));
        }
        state.tasks.insert(task.task_id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&task.task_id()) {
            return Err(TaskStoreError::NotFound(task.task_id()));
        }
        state.tasks.insert(task.task_id(), task.clone());
        Ok(())
    }

    async fn remove(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskStoreError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_uuid(
        &self,
        uuid: Uuid,
        group_id: GroupId,
    ) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .find(|task| task.uuid() == uuid && task.group_id() == group_id)
            .cloned())
    }

    async fn find_by_scope(
        &self,
        scope: Scope,
        status: Option<TaskStatus>,
        bounds: PageBounds,
    ) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| in_scope(task, scope, status))
            .skip(bounds.start())
            .take(bounds.size())
            .cloned()
            .collect())
    }

    async fn count_by_scope(
        &self,
        scope: Scope,
        status: Option<TaskStatus>,
    ) -> TaskStoreResult<u64> {
        let state = self.read()?;
        let count = state
            .tasks
            .values()
            .filter(|task| in_scope(task, scope, status))
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find_by_creator(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.company_id() == company_id && task.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_assignee(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.company_id() == company_id && task.assignee_id() == user_id)
            .cloned()
            .collect())
    }
}
