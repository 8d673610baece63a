//! Behavioural integration tests for the task lifecycle service.
//!
//! These tests exercise the service through the public crate API in
//! realistic flows: creating a task under a scope, reading it back,
//! updating it, and deleting it with full auxiliary-state cleanup.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Timelike};
use mockable::DefaultClock;
use taskdesk::task::{
    adapters::memory::{
        InMemoryAssetSync, InMemoryIdentityResolver, InMemoryResourceScope, InMemoryTaskStore,
    },
    domain::{
        AssetCategoryId, AssetContext, AssetLinkId, CompanyId, GroupId, PageBounds, Scope,
        ScopeContext, UserId,
    },
    ports::Identity,
    services::{AddTaskRequest, TaskService, TaskServiceError, UpdateTaskRequest},
};
use tokio::runtime::Runtime;

type MemoryTaskService = TaskService<
    InMemoryTaskStore,
    InMemoryIdentityResolver,
    InMemoryResourceScope,
    InMemoryAssetSync,
    DefaultClock,
>;

const ACTOR: UserId = UserId::new(1);
const ASSIGNEE: UserId = UserId::new(2);
const COMPANY: CompanyId = CompanyId::new(10);
const GROUP: GroupId = GroupId::new(100);

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

struct Fixture {
    service: MemoryTaskService,
    resource: Arc<InMemoryResourceScope>,
    asset: Arc<InMemoryAssetSync>,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryTaskStore::new());
    let identity = Arc::new(
        InMemoryIdentityResolver::new()
            .with_identity(Identity::new(ACTOR, COMPANY, "Ada Lovelace"))
            .with_identity(Identity::new(ASSIGNEE, COMPANY, "Grace Hopper")),
    );
    let resource = Arc::new(InMemoryResourceScope::new());
    let asset = Arc::new(InMemoryAssetSync::new());
    let service = TaskService::new(
        store,
        identity,
        Arc::clone(&resource),
        Arc::clone(&asset),
        Arc::new(DefaultClock),
    );
    Fixture {
        service,
        resource,
        asset,
    }
}

#[test]
fn create_read_update_delete_flow() {
    let rt = test_runtime();
    let Fixture {
        service,
        resource,
        asset,
    } = fixture();

    // Create under company 10 / group 100 with the full asset context.
    let context = ScopeContext::for_group(GROUP).with_asset(
        AssetContext::new()
            .with_categories(vec![AssetCategoryId::new(3)])
            .with_tags(vec!["shipping".to_owned()])
            .with_links(vec![AssetLinkId::new(8)])
            .with_priority(2.0),
    );
    let request = AddTaskRequest::new(ACTOR, "Ship report", 3, 15, 2025, ASSIGNEE)
        .with_description("Quarterly shipping report");
    let created = rt
        .block_on(service.add_task(request, &context))
        .expect("task creation should succeed");

    assert_eq!(created.company_id(), COMPANY);
    assert_eq!(created.group_id(), GROUP);
    assert!(!created.completed());
    let expiration = created.expiration_date().as_datetime();
    assert_eq!(
        (expiration.year(), expiration.month(), expiration.day()),
        (2025, 3, 15)
    );
    assert_eq!((expiration.hour(), expiration.minute()), (0, 0));

    // Read-after-write returns an equal record.
    let fetched = rt
        .block_on(service.get_task(created.task_id()))
        .expect("lookup should succeed");
    assert_eq!(fetched, created);

    // The auxiliary views exist alongside the record.
    assert!(resource.is_granted(created.task_id()));
    let entry = asset.entry(created.task_id()).expect("projection exists");
    assert!(entry.projection.visible);
    assert_eq!(entry.links, vec![AssetLinkId::new(8)]);

    // Update: title round-trips and the modification timestamp advances.
    std::thread::sleep(Duration::from_millis(5));
    let update = UpdateTaskRequest::new(ACTOR, created.task_id(), "X", 3, 15, 2025, ASSIGNEE)
        .with_description("Revised figures")
        .with_completed(true);
    let updated = rt
        .block_on(service.update_task(update, &context))
        .expect("update should succeed");
    assert_eq!(updated.title().as_str(), "X");
    assert!(updated.modified_date() > created.create_date());
    let refreshed = asset.entry(created.task_id()).expect("projection exists");
    assert_eq!(refreshed.projection.title, "X");
    assert_eq!(refreshed.projection.summary, "Revised figures");

    // Delete: the record and both auxiliary views disappear.
    rt.block_on(service.delete_task(created.task_id()))
        .expect("deletion should succeed");
    let lookup = rt.block_on(service.get_task(created.task_id()));
    assert!(matches!(lookup, Err(TaskServiceError::TaskNotFound(_))));
    assert!(!resource.is_granted(created.task_id()));
    assert!(!asset.contains(created.task_id()));
}

#[test]
fn scoped_listing_and_counts_follow_pagination_contract() {
    let rt = test_runtime();
    let Fixture { service, .. } = fixture();
    let scope = Scope::new(COMPANY, GROUP);
    let context = ScopeContext::for_group(GROUP);

    for index in 0..5 {
        let request = AddTaskRequest::new(ACTOR, format!("Task {index}"), 6, 1, 2026, ASSIGNEE);
        rt.block_on(service.add_task(request, &context))
            .expect("task creation should succeed");
    }

    let count = rt
        .block_on(service.get_tasks_count(scope))
        .expect("count should succeed");
    assert_eq!(count, 5);

    let window = rt
        .block_on(service.get_tasks(scope, PageBounds::new(1, 4)))
        .expect("listing should succeed");
    assert_eq!(window.len(), 3);

    let past_end = rt
        .block_on(service.get_tasks(scope, PageBounds::new(4, 40)))
        .expect("listing should succeed");
    assert_eq!(past_end.len(), 1);

    // Windows are stable without concurrent writes: re-reading the same
    // bounds yields the same tasks.
    let again = rt
        .block_on(service.get_tasks(scope, PageBounds::new(1, 4)))
        .expect("listing should succeed");
    assert_eq!(again, window);

    let titles: Vec<_> = window
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect();
    assert_eq!(titles, vec!["Task 1", "Task 2", "Task 3"]);
}
