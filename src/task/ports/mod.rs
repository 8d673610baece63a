//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod asset;
pub mod identity;
pub mod resource;
pub mod store;

pub use asset::{AssetHandle, AssetSync, AssetSyncError, AssetSyncResult, AssetUpsert};
pub use identity::{Identity, IdentityError, IdentityResolver, IdentityResult};
pub use resource::{ResourceGrant, ResourceScope, ResourceScopeError, ResourceScopeResult};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};
