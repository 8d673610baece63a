//! `PostgreSQL` store implementation for task persistence.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        CompanyId, ExpirationDate, GroupId, PageBounds, PersistedTaskData, Scope, Task, TaskId,
        TaskStatus, TaskTitle, UserId,
    },
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
///
/// Identifier allocation draws from the `tasks_task_id_seq` sequence, so
/// identifiers are monotonic and never reused regardless of row deletions.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

#[derive(QueryableByName)]
struct NextTaskId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    id: i64,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn allocate_id(&self) -> TaskStoreResult<TaskId> {
        self.run_blocking(move |connection| {
            let row: NextTaskId =
                diesel::sql_query("SELECT nextval('tasks_task_id_seq') AS id")
                    .get_result(connection)
                    .map_err(TaskStoreError::persistence)?;
            Ok(TaskId::new(row.id))
        })
        .await
    }

    async fn store(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.task_id();
        let new_row = to_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskStoreError::DuplicateTask(task_id)
                    }
                    _ => TaskStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.task_id();
        let row = to_row(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::task_id.eq(task_id.value())))
                .set(&row)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if updated == 0 {
                return Err(TaskStoreError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: TaskId) -> TaskStoreResult<()> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.filter(tasks::task_id.eq(id.value())))
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if removed == 0 {
                return Err(TaskStoreError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::task_id.eq(id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_uuid(
        &self,
        uuid: Uuid,
        group_id: GroupId,
    ) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::uuid.eq(uuid))
                .filter(tasks::group_id.eq(group_id.value()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_scope(
        &self,
        scope: Scope,
        status: Option<TaskStatus>,
        bounds: PageBounds,
    ) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::company_id.eq(scope.company_id.value()))
                .filter(tasks::group_id.eq(scope.group_id.value()))
                .order(tasks::task_id.asc())
                .select(TaskRow::as_select())
                .into_boxed();
            if let Some(wanted) = status {
                query = query.filter(tasks::status.eq(wanted.as_str()));
            }
            query = query
                .offset(i64::try_from(bounds.start()).unwrap_or(i64::MAX))
                .limit(i64::try_from(bounds.size()).unwrap_or(i64::MAX));

            let rows = query
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_by_scope(
        &self,
        scope: Scope,
        status: Option<TaskStatus>,
    ) -> TaskStoreResult<u64> {
        self.run_blocking(move |connection| {
            let scoped = tasks::table
                .filter(tasks::company_id.eq(scope.company_id.value()))
                .filter(tasks::group_id.eq(scope.group_id.value()));
            let count: i64 = match status {
                Some(wanted) => scoped
                    .filter(tasks::status.eq(wanted.as_str()))
                    .count()
                    .get_result(connection),
                None => scoped.count().get_result(connection),
            }
            .map_err(TaskStoreError::persistence)?;
            u64::try_from(count).map_err(TaskStoreError::persistence)
        })
        .await
    }

    async fn find_by_creator(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::company_id.eq(company_id.value()))
                .filter(tasks::user_id.eq(user_id.value()))
                .order(tasks::task_id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_assignee(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::company_id.eq(company_id.value()))
                .filter(tasks::assignee_id.eq(user_id.value()))
                .order(tasks::task_id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn to_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        task_id: task.task_id().value(),
        uuid: task.uuid(),
        company_id: task.company_id().value(),
        group_id: task.group_id().value(),
        user_id: task.user_id().value(),
        user_name: task.user_name().to_owned(),
        create_date: task.create_date(),
        modified_date: task.modified_date(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        expiration_date: task.expiration_date().as_datetime(),
        assignee_id: task.assignee_id().value(),
        completed: task.completed(),
        status: task.status().as_str().to_owned(),
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskStoreError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskStoreError::persistence)?;

    let data = PersistedTaskData {
        task_id: TaskId::new(row.task_id),
        uuid: row.uuid,
        company_id: CompanyId::new(row.company_id),
        group_id: GroupId::new(row.group_id),
        user_id: UserId::new(row.user_id),
        user_name: row.user_name,
        create_date: row.create_date,
        modified_date: row.modified_date,
        title,
        description: row.description,
        expiration_date: ExpirationDate::from_datetime(row.expiration_date),
        assignee_id: UserId::new(row.assignee_id),
        completed: row.completed,
        status,
    };
    Ok(Task::from_persisted(data))
}
