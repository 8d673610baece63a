//! Task lifecycle management for Taskdesk.
//!
//! This module implements the task entity lifecycle: creating tasks under a
//! company/group scope, updating their mutable fields, deleting them
//! individually or in bulk, and keeping the per-task asset projection and
//! resource entry synchronized with every mutation. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//!
//! The task record, its resource entry, and its asset projection are three
//! independently-owned pieces of state. No transaction spans them: a
//! collaborator failure mid-operation leaves the already-completed steps in
//! place, and [`services::TaskService::reconcile_group_assets`] can repair
//! asset drift out of band.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
