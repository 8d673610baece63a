//! Diesel schema for task persistence.

diesel::table! {
    /// Task records scoped by company and group.
    tasks (task_id) {
        /// Store-allocated task identifier.
        task_id -> BigInt,
        /// Stable UUID of the record.
        uuid -> Uuid,
        /// Owning company identifier.
        company_id -> BigInt,
        /// Owning group identifier.
        group_id -> BigInt,
        /// Creator identifier.
        user_id -> BigInt,
        /// Creator display name snapshot.
        #[max_length = 255]
        user_name -> Varchar,
        /// Creation timestamp.
        create_date -> Timestamptz,
        /// Last-mutation timestamp.
        modified_date -> Timestamptz,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Expiration date, midnight-normalized.
        expiration_date -> Timestamptz,
        /// Assignee identifier.
        assignee_id -> BigInt,
        /// Completion flag.
        completed -> Bool,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
    }
}
