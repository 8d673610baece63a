//! Identity port for resolving user references.

use crate::task::domain::{CompanyId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity resolution.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Resolved user record.
///
/// Carries the fields the task lifecycle denormalizes at creation time: the
/// user's owning company and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// User identifier.
    pub user_id: UserId,
    /// Company the user belongs to.
    pub company_id: CompanyId,
    /// Display name captured into created task records.
    pub full_name: String,
}

impl Identity {
    /// Creates an identity record.
    #[must_use]
    pub fn new(user_id: UserId, company_id: CompanyId, full_name: impl Into<String>) -> Self {
        Self {
            user_id,
            company_id,
            full_name: full_name.into(),
        }
    }
}

/// User existence and attribute lookup contract.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves a user identifier to its identity record.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::UnknownUser`] when the identifier does not
    /// name an existing user.
    async fn resolve(&self, user_id: UserId) -> IdentityResult<Identity>;
}

/// Errors returned by identity resolver implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// No user exists for the identifier.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// Lookup-layer failure.
    #[error("identity lookup error: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
