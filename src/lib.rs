//! Taskdesk: tenancy-scoped task management with asset synchronization.
//!
//! This crate implements the lifecycle of a task business entity scoped by
//! company and group. Every mutation keeps two auxiliary views consistent
//! with the durable record: a searchable/taggable "asset" projection and an
//! access-control resource entry, both owned by host-supplied collaborators.
//!
//! # Architecture
//!
//! Taskdesk follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external collaborators
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, scoped queries, and asset/resource sync

pub mod task;
