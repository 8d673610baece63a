//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    AddTaskRequest, BulkDeleteReport, BulkFailure, BulkSyncReport, TaskService, TaskServiceError,
    TaskServiceResult, UpdateTaskRequest,
};
