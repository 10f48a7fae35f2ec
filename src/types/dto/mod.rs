pub mod admin_user;
pub mod auth;
pub mod common;
pub mod issue;
pub mod module;
pub mod operation;
pub mod project;
pub mod role;
pub mod task;
