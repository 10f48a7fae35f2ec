use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};
use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::types::dto::common::HealthResponse;

/// Health check API
pub struct HealthApi {
    db: DatabaseConnection,
}

impl HealthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
        }
    }
}

/// API tags for health endpoints
#[derive(Tags)]
enum ApiTags {
    /// Health check endpoints
    Health,
}

#[OpenApi]
impl HealthApi {
    /// Health check endpoint
    ///
    /// Reports whether the service is up and the database answers a ping
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health(&self) -> Json<HealthResponse> {
        let database = match self.db.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                false
            }
        };

        Json(HealthResponse {
            status: "ok".to_string(),
            database,
        })
    }
}
