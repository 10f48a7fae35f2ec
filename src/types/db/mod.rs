// Database entities - SeaORM models
pub mod admin_user;
pub mod admin_user_otp;
pub mod admin_user_role;
pub mod issue;
pub mod issue_user;
pub mod module;
pub mod module_type;
pub mod operation;
pub mod project;
pub mod project_user;
pub mod role;
pub mod role_operation;
pub mod task;
