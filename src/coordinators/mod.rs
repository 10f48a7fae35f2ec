// Coordinators layer - Workflow orchestration
//
// Coordinators compose provider and store calls for specific API endpoints.
// Each request runs as one unit of work; multi-write sequences share a transaction.

pub mod admin_user_coordinator;
pub mod auth_coordinator;
pub mod issue_coordinator;
pub mod module_coordinator;
pub mod operation_coordinator;
pub mod project_coordinator;
pub mod role_coordinator;
pub mod task_coordinator;

pub use admin_user_coordinator::AdminUserCoordinator;
pub use auth_coordinator::AuthCoordinator;
pub use issue_coordinator::IssueCoordinator;
pub use module_coordinator::ModuleCoordinator;
pub use operation_coordinator::OperationCoordinator;
pub use project_coordinator::ProjectCoordinator;
pub use role_coordinator::RoleCoordinator;
pub use task_coordinator::TaskCoordinator;
