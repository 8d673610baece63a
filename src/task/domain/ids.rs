//! Identifier newtypes for the task domain.
//!
//! All identifiers are numeric handles owned by the host platform. Task
//! identifiers are allocated by the task store's monotonic sequence; the
//! rest arrive from the caller's context.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! numeric_id {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw numeric identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id! {
    /// Unique identifier of a task record.
    ///
    /// Allocated once by [`crate::task::ports::TaskStore::allocate_id`] and
    /// never reused.
    TaskId
}

numeric_id! {
    /// Tenancy identifier of the owning company.
    CompanyId
}

numeric_id! {
    /// Tenancy identifier of the owning group within a company.
    GroupId
}

numeric_id! {
    /// Identifier of a user known to the host's identity subsystem.
    UserId
}

numeric_id! {
    /// Identifier of an asset category in the host's asset subsystem.
    AssetCategoryId
}

numeric_id! {
    /// Identifier of another asset entry a task's projection links to.
    AssetLinkId
}
