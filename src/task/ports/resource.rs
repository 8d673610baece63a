//! Resource port for task access-control entries.

use crate::task::domain::{CompanyId, GroupId, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for resource scope operations.
pub type ResourceScopeResult<T> = Result<T, ResourceScopeError>;

/// Access-control entry binding a task to its scope and creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceGrant {
    /// Company the entry is scoped to.
    pub company_id: CompanyId,
    /// Group the entry is scoped to.
    pub group_id: GroupId,
    /// User the entry grants owner permissions to.
    pub actor_id: UserId,
    /// Task the entry is bound to.
    pub task_id: TaskId,
}

/// Access-control bookkeeping contract.
///
/// One entry exists per task: granted at creation, revoked at deletion, and
/// left untouched by updates. Permission checking itself is the host's
/// concern.
#[async_trait]
pub trait ResourceScope: Send + Sync {
    /// Grants the access-control entry for a newly created task.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceScopeError::Grant`] when the host subsystem
    /// rejects the entry.
    async fn grant(&self, grant: ResourceGrant) -> ResourceScopeResult<()>;

    /// Revokes the access-control entry of a deleted task.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceScopeError::Revoke`] when the host subsystem
    /// fails to drop the entry.
    async fn revoke(&self, company_id: CompanyId, task_id: TaskId) -> ResourceScopeResult<()>;
}

/// Errors returned by resource scope implementations.
#[derive(Debug, Clone, Error)]
pub enum ResourceScopeError {
    /// Granting the entry failed.
    #[error("resource grant failed: {0}")]
    Grant(Arc<dyn std::error::Error + Send + Sync>),

    /// Revoking the entry failed.
    #[error("resource revoke failed: {0}")]
    Revoke(Arc<dyn std::error::Error + Send + Sync>),
}

impl ResourceScopeError {
    /// Wraps a grant failure.
    pub fn grant(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Grant(Arc::new(err))
    }

    /// Wraps a revoke failure.
    pub fn revoke(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Revoke(Arc::new(err))
    }
}
