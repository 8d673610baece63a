//! Shared fixtures for task service tests.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::task::{
    adapters::memory::{
        InMemoryAssetSync, InMemoryIdentityResolver, InMemoryResourceScope, InMemoryTaskStore,
    },
    domain::{CompanyId, GroupId, ScopeContext, UserId},
    ports::Identity,
    services::{AddTaskRequest, TaskService},
};

/// Service wired to in-memory adapters.
pub type TestService = TaskService<
    InMemoryTaskStore,
    InMemoryIdentityResolver,
    InMemoryResourceScope,
    InMemoryAssetSync,
    DefaultClock,
>;

/// Actor seeded into the directory (company 10).
pub const ACTOR: UserId = UserId::new(1);
/// Assignee seeded into the directory (company 10).
pub const ASSIGNEE: UserId = UserId::new(2);
/// Second company's user seeded into the directory (company 20).
pub const OUTSIDER: UserId = UserId::new(5);
/// Company of the seeded actor and assignee.
pub const COMPANY: CompanyId = CompanyId::new(10);
/// Default group used by tests.
pub const GROUP: GroupId = GroupId::new(100);

/// Service plus handles on its adapters for direct inspection.
pub struct Harness {
    /// Service under test.
    pub service: TestService,
    /// Store the service persists into.
    pub store: Arc<InMemoryTaskStore>,
    /// Resource registry the service grants into.
    pub resource: Arc<InMemoryResourceScope>,
    /// Asset registry the service projects into.
    pub asset: Arc<InMemoryAssetSync>,
}

/// Builds a harness with the standard identities seeded.
pub fn harness() -> Harness {
    let store = Arc::new(InMemoryTaskStore::new());
    let identity = Arc::new(
        InMemoryIdentityResolver::new()
            .with_identity(Identity::new(ACTOR, COMPANY, "Ada Lovelace"))
            .with_identity(Identity::new(ASSIGNEE, COMPANY, "Grace Hopper"))
            .with_identity(Identity::new(OUTSIDER, CompanyId::new(20), "Mary Shelley")),
    );
    let resource = Arc::new(InMemoryResourceScope::new());
    let asset = Arc::new(InMemoryAssetSync::new());
    let service = TaskService::new(
        Arc::clone(&store),
        identity,
        Arc::clone(&resource),
        Arc::clone(&asset),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        store,
        resource,
        asset,
    }
}

/// Request for the standard "Ship report" task used across tests.
pub fn ship_report_request() -> AddTaskRequest {
    AddTaskRequest::new(ACTOR, "Ship report", 3, 15, 2025, ASSIGNEE)
        .with_description("Quarterly shipping report for the harbour office")
}

/// Context scoped to the default group.
pub fn group_context() -> ScopeContext {
    ScopeContext::for_group(GROUP)
}
