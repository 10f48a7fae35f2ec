// Stores layer - data access
//
// Every function takes a `ConnectionTrait` so callers can run it on the pool
// or inside a transaction they own.

pub mod admin_user_store;
pub mod issue_store;
pub mod listing_store;
pub mod module_store;
pub mod module_type_store;
pub mod operation_store;
pub mod otp_store;
pub mod project_store;
pub mod role_store;
pub mod task_store;
