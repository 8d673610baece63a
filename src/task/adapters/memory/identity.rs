//! In-memory identity directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::UserId,
    ports::{Identity, IdentityError, IdentityResolver, IdentityResult},
};

/// In-memory identity resolver backed by a user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityResolver {
    users: Arc<RwLock<HashMap<UserId, Identity>>>,
}

impl InMemoryIdentityResolver {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an identity to the directory, builder-style.
    #[must_use]
    pub fn with_identity(self, identity: Identity) -> Self {
        self.register(identity);
        self
    }

    /// Registers an identity, replacing any previous record for the user.
    pub fn register(&self, identity: Identity) {
        if let Ok(mut users) = self.users.write() {
            users.insert(identity.user_id, identity);
        }
    }
}

#[async_trait]
impl IdentityResolver for InMemoryIdentityResolver {
    async fn resolve(&self, user_id: UserId) -> IdentityResult<Identity> {
        let users = self
            .users
            .read()
            .map_err(|err| IdentityError::lookup(std::io::Error::other(err.to_string())))?;
        users
            .get(&user_id)
            .cloned()
            .ok_or(IdentityError::UnknownUser(user_id))
    }
}
