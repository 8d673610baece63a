//! Domain model for task lifecycle management.
//!
//! The task domain models tenancy-scoped task records, their validated
//! fields, and the per-call context a host supplies, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod fields;
mod ids;
mod scope;
mod task;

pub mod summary;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use fields::{ExpirationDate, TaskTitle};
pub use ids::{AssetCategoryId, AssetLinkId, CompanyId, GroupId, TaskId, UserId};
pub use scope::{AssetContext, PageBounds, Scope, ScopeContext};
pub use task::{NewTaskData, PersistedTaskData, Task, TaskChanges, TaskStatus};
