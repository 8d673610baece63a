//! Task aggregate root and related lifecycle types.

use super::{
    CompanyId, ExpirationDate, GroupId, ParseTaskStatusError, Scope, TaskId, TaskTitle, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow approval status of a task.
///
/// Status transitions are owned by the host's workflow subsystem; this crate
/// only records the current value and derives asset visibility from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is approved and publicly visible.
    Approved,
    /// Task is awaiting workflow approval.
    Pending,
    /// Task is an unsubmitted draft.
    Draft,
    /// Task has passed its expiration date.
    Expired,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Draft => "draft",
            Self::Expired => "expired",
        }
    }

    /// Whether a task with this status is publicly visible for asset
    /// purposes.
    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "approved" => Ok(Self::Approved),
            "pending" => Ok(Self::Pending),
            "draft" => Ok(Self::Draft),
            "expired" => Ok(Self::Expired),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
///
/// The creator identity (`user_id`, `user_name`) is a snapshot captured at
/// creation time and never re-resolved, so renames in the identity subsystem
/// do not rewrite the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    task_id: TaskId,
    uuid: Uuid,
    company_id: CompanyId,
    group_id: GroupId,
    user_id: UserId,
    user_name: String,
    create_date: DateTime<Utc>,
    modified_date: DateTime<Utc>,
    title: TaskTitle,
    description: Option<String>,
    expiration_date: ExpirationDate,
    assignee_id: UserId,
    completed: bool,
    status: TaskStatus,
}

/// Parameter object for building a new task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Store-allocated task identifier.
    pub task_id: TaskId,
    /// Stable UUID, caller-supplied or freshly generated.
    pub uuid: Uuid,
    /// Owning company, taken from the creator's identity.
    pub company_id: CompanyId,
    /// Owning group, taken from the acting context.
    pub group_id: GroupId,
    /// Creating user identifier.
    pub creator_id: UserId,
    /// Creating user display name, denormalized at creation time.
    pub creator_name: String,
    /// Validated task title.
    pub title: TaskTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Expiration date, midnight-normalized.
    pub expiration_date: ExpirationDate,
    /// Assigned user identifier.
    pub assignee_id: UserId,
    /// Completion flag.
    pub completed: bool,
}

/// Mutable fields applied by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: TaskTitle,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement expiration date.
    pub expiration_date: ExpirationDate,
    /// Replacement assignee.
    pub assignee_id: UserId,
    /// Replacement completion flag.
    pub completed: bool,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub task_id: TaskId,
    /// Persisted stable UUID.
    pub uuid: Uuid,
    /// Persisted owning company.
    pub company_id: CompanyId,
    /// Persisted owning group.
    pub group_id: GroupId,
    /// Persisted creator identifier.
    pub user_id: UserId,
    /// Persisted creator display name.
    pub user_name: String,
    /// Persisted creation timestamp.
    pub create_date: DateTime<Utc>,
    /// Persisted last-mutation timestamp.
    pub modified_date: DateTime<Utc>,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted expiration date.
    pub expiration_date: ExpirationDate,
    /// Persisted assignee identifier.
    pub assignee_id: UserId,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted workflow status.
    pub status: TaskStatus,
}

impl Task {
    /// Builds a new task record with audit fields from the given clock.
    ///
    /// New tasks start in [`TaskStatus::Approved`]: no workflow hand-off
    /// happens at creation, so the record is immediately visible.
    #[must_use]
    pub fn create(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            task_id: data.task_id,
            uuid: data.uuid,
            company_id: data.company_id,
            group_id: data.group_id,
            user_id: data.creator_id,
            user_name: data.creator_name,
            create_date: timestamp,
            modified_date: timestamp,
            title: data.title,
            description: data.description,
            expiration_date: data.expiration_date,
            assignee_id: data.assignee_id,
            completed: data.completed,
            status: TaskStatus::Approved,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            task_id: data.task_id,
            uuid: data.uuid,
            company_id: data.company_id,
            group_id: data.group_id,
            user_id: data.user_id,
            user_name: data.user_name,
            create_date: data.create_date,
            modified_date: data.modified_date,
            title: data.title,
            description: data.description,
            expiration_date: data.expiration_date,
            assignee_id: data.assignee_id,
            completed: data.completed,
            status: data.status,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the stable UUID.
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Returns the owning company identifier.
    #[must_use]
    pub const fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Returns the owning group identifier.
    #[must_use]
    pub const fn group_id(&self) -> GroupId {
        self.group_id
    }

    /// Returns the tenancy scope the task lives under.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        Scope::new(self.company_id, self.group_id)
    }

    /// Returns the creator identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the creator display name captured at creation time.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn create_date(&self) -> DateTime<Utc> {
        self.create_date
    }

    /// Returns the last-mutation timestamp.
    #[must_use]
    pub const fn modified_date(&self) -> DateTime<Utc> {
        self.modified_date
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the free-text description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the expiration date.
    #[must_use]
    pub const fn expiration_date(&self) -> ExpirationDate {
        self.expiration_date
    }

    /// Returns the assignee identifier.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the completion flag.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Applies an update to the mutable fields and advances the
    /// modification timestamp.
    pub fn apply_update(&mut self, changes: TaskChanges, clock: &impl Clock) {
        self.title = changes.title;
        self.description = changes.description;
        self.expiration_date = changes.expiration_date;
        self.assignee_id = changes.assignee_id;
        self.completed = changes.completed;
        self.touch(clock);
    }

    /// Records a workflow status decided by the host's workflow subsystem.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Updates the `modified_date` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.modified_date = clock.utc();
    }
}
