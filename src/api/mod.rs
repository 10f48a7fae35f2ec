// API layer - HTTP endpoints
pub mod admin_users;
pub mod auth;
pub mod health;
pub mod helpers;
pub mod issues;
pub mod module_types;
pub mod modules;
pub mod operations;
pub mod profile;
pub mod projects;
pub mod roles;
pub mod tasks;

use std::sync::Arc;

use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;

pub use admin_users::AdminUsersApi;
pub use auth::AuthApi;
pub use health::HealthApi;
pub use issues::IssuesApi;
pub use module_types::ModuleTypesApi;
pub use modules::ModulesApi;
pub use operations::OperationsApi;
pub use profile::ProfileApi;
pub use projects::ProjectsApi;
pub use roles::RolesApi;
pub use tasks::TasksApi;

use crate::app_data::AppData;

/// Compose every API into one routed endpoint
///
/// The API is nested under `/api` and Swagger UI under `/swagger`. Request
/// shape and missing token failures raised by poem-openapi are rewritten into
/// the standard error body.
pub fn build_app(app_data: Arc<AppData>, server_url: &str) -> impl Endpoint + use<> {
    let api_service = OpenApiService::new(
        (
            HealthApi::new(app_data.clone()),
            AuthApi::new(app_data.clone()),
            ProfileApi::new(app_data.clone()),
            AdminUsersApi::new(app_data.clone()),
            OperationsApi::new(app_data.clone()),
            RolesApi::new(app_data.clone()),
            ProjectsApi::new(app_data.clone()),
            ModuleTypesApi::new(app_data.clone()),
            ModulesApi::new(app_data.clone()),
            TasksApi::new(app_data.clone()),
            IssuesApi::new(app_data),
        ),
        "ProjectX Admin API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();

    Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .catch_error(helpers::missing_token)
        .catch_error(helpers::invalid_payload)
        .catch_error(helpers::invalid_param)
}
