//! Integration tests for bulk deletion and asset reconciliation.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]
#![expect(
    clippy::indexing_slicing,
    reason = "Test code uses indexing after length checks"
)]

use std::sync::Arc;

use mockable::DefaultClock;
use taskdesk::task::{
    adapters::memory::{
        InMemoryAssetSync, InMemoryIdentityResolver, InMemoryResourceScope, InMemoryTaskStore,
    },
    domain::{AssetContext, CompanyId, GroupId, Scope, ScopeContext, UserId},
    ports::{AssetSync, Identity},
    services::{AddTaskRequest, TaskService},
};
use tokio::runtime::Runtime;

type MemoryTaskService = TaskService<
    InMemoryTaskStore,
    InMemoryIdentityResolver,
    InMemoryResourceScope,
    InMemoryAssetSync,
    DefaultClock,
>;

const ALICE: UserId = UserId::new(1);
const BOB: UserId = UserId::new(2);
const COMPANY: CompanyId = CompanyId::new(10);

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn service_with_asset() -> (MemoryTaskService, Arc<InMemoryAssetSync>) {
    let store = Arc::new(InMemoryTaskStore::new());
    let identity = Arc::new(
        InMemoryIdentityResolver::new()
            .with_identity(Identity::new(ALICE, COMPANY, "Alice Coder"))
            .with_identity(Identity::new(BOB, COMPANY, "Bob Reviewer")),
    );
    let resource = Arc::new(InMemoryResourceScope::new());
    let asset = Arc::new(InMemoryAssetSync::new());
    let service = TaskService::new(store, identity, resource, Arc::clone(&asset), Arc::new(DefaultClock));
    (service, asset)
}

#[test]
fn group_deletion_clears_one_scope_and_spares_the_other() {
    let rt = test_runtime();
    let (service, asset) = service_with_asset();
    let group_one = GroupId::new(100);
    let group_two = GroupId::new(200);

    let first = rt
        .block_on(service.add_task(
            AddTaskRequest::new(ALICE, "In group one", 6, 1, 2026, BOB),
            &ScopeContext::for_group(group_one),
        ))
        .expect("task creation should succeed");
    let second = rt
        .block_on(service.add_task(
            AddTaskRequest::new(ALICE, "In group two", 6, 1, 2026, BOB),
            &ScopeContext::for_group(group_two),
        ))
        .expect("task creation should succeed");

    let report = rt
        .block_on(service.delete_group_tasks(Scope::new(COMPANY, group_one)))
        .expect("bulk delete should succeed");
    assert!(report.is_complete());
    assert_eq!(report.deleted.len(), 1);
    assert_eq!(report.deleted[0].task_id(), first.task_id());

    assert!(!asset.contains(first.task_id()));
    assert!(asset.contains(second.task_id()));
    let survivor = rt
        .block_on(service.get_task(second.task_id()))
        .expect("other scope should survive");
    assert_eq!(survivor.task_id(), second.task_id());
}

#[test]
fn user_deletion_covers_created_and_assigned_tasks() {
    let rt = test_runtime();
    let (service, _) = service_with_asset();
    let context = ScopeContext::for_group(GroupId::new(100));

    let created_by_alice = rt
        .block_on(service.add_task(
            AddTaskRequest::new(ALICE, "Alice's errand", 6, 1, 2026, BOB),
            &context,
        ))
        .expect("task creation should succeed");
    let assigned_to_alice = rt
        .block_on(service.add_task(
            AddTaskRequest::new(BOB, "For Alice", 6, 1, 2026, ALICE),
            &context,
        ))
        .expect("task creation should succeed");
    let bobs_own = rt
        .block_on(service.add_task(
            AddTaskRequest::new(BOB, "Bob's errand", 6, 1, 2026, BOB),
            &context,
        ))
        .expect("task creation should succeed");

    let report = rt
        .block_on(service.delete_user_tasks(COMPANY, ALICE))
        .expect("bulk delete should succeed");
    assert!(report.is_complete());
    assert_eq!(report.deleted.len(), 2);

    for gone in [created_by_alice.task_id(), assigned_to_alice.task_id()] {
        assert!(rt.block_on(service.get_task(gone)).is_err());
    }
    let kept = rt
        .block_on(service.get_task(bobs_own.task_id()))
        .expect("unrelated task should survive");
    assert_eq!(kept.task_id(), bobs_own.task_id());
}

#[test]
fn reconciliation_restores_projections_for_a_whole_scope() {
    let rt = test_runtime();
    let (service, asset) = service_with_asset();
    let group = GroupId::new(100);
    let context = ScopeContext::for_group(group);

    let mut task_ids = Vec::new();
    for index in 0..3 {
        let request = AddTaskRequest::new(ALICE, format!("Task {index}"), 6, 1, 2026, BOB);
        let created = rt
            .block_on(service.add_task(request, &context))
            .expect("task creation should succeed");
        task_ids.push(created.task_id());
    }

    // Simulate projection loss for the whole scope.
    for task_id in &task_ids {
        rt.block_on(asset.remove(*task_id))
            .expect("manual removal should succeed");
    }
    assert_eq!(asset.entry_count(), 0);

    let report = rt
        .block_on(service.reconcile_group_assets(
            ALICE,
            Scope::new(COMPANY, group),
            &AssetContext::new(),
        ))
        .expect("reconciliation should run");

    assert!(report.is_complete());
    assert_eq!(report.synced.len(), 3);
    assert_eq!(asset.entry_count(), 3);
    for task_id in &task_ids {
        assert!(asset.contains(*task_id));
    }
}
