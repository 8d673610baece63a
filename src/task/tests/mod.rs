//! Unit and service tests for the task module.

mod support;
