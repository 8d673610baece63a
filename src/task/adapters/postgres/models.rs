//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-allocated task identifier.
    pub task_id: i64,
    /// Stable UUID of the record.
    pub uuid: uuid::Uuid,
    /// Owning company identifier.
    pub company_id: i64,
    /// Owning group identifier.
    pub group_id: i64,
    /// Creator identifier.
    pub user_id: i64,
    /// Creator display name snapshot.
    pub user_name: String,
    /// Creation timestamp.
    pub create_date: DateTime<Utc>,
    /// Last-mutation timestamp.
    pub modified_date: DateTime<Utc>,
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Expiration date, midnight-normalized.
    pub expiration_date: DateTime<Utc>,
    /// Assignee identifier.
    pub assignee_id: i64,
    /// Completion flag.
    pub completed: bool,
    /// Workflow status.
    pub status: String,
}

/// Insert and update model for task records.
///
/// `None` fields write SQL `NULL` so updates can clear the description.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct NewTaskRow {
    /// Store-allocated task identifier.
    pub task_id: i64,
    /// Stable UUID of the record.
    pub uuid: uuid::Uuid,
    /// Owning company identifier.
    pub company_id: i64,
    /// Owning group identifier.
    pub group_id: i64,
    /// Creator identifier.
    pub user_id: i64,
    /// Creator display name snapshot.
    pub user_name: String,
    /// Creation timestamp.
    pub create_date: DateTime<Utc>,
    /// Last-mutation timestamp.
    pub modified_date: DateTime<Utc>,
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Expiration date, midnight-normalized.
    pub expiration_date: DateTime<Utc>,
    /// Assignee identifier.
    pub assignee_id: i64,
    /// Completion flag.
    pub completed: bool,
    /// Workflow status.
    pub status: String,
}
