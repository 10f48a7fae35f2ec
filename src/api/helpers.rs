use poem::{IntoResponse, Response};
use poem_openapi::auth::ApiKey;
use poem_openapi::error::{AuthorizationError, ParseParamError, ParseRequestPayloadError};
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, SecurityScheme};

use crate::coordinators::AuthCoordinator;
use crate::errors::ApiError;
use crate::types::db::admin_user;
use crate::types::dto::common::CreatedResponse;
use crate::types::internal::listing::{DEFAULT_LIMIT, ListParams, SortOrder};

/// Opaque session token issued by `POST /login`
#[derive(SecurityScheme)]
#[oai(ty = "api_key", key_name = "token", key_in = "header")]
pub struct SessionToken(pub ApiKey);

/// 201 with the new resource id
#[derive(ApiResponse)]
pub enum Created {
    #[oai(status = 201)]
    Created(Json<CreatedResponse>),
}

impl Created {
    pub fn id(id: String) -> Self {
        Created::Created(Json(CreatedResponse { id }))
    }
}

#[derive(ApiResponse)]
pub enum NoContent {
    #[oai(status = 204)]
    NoContent,
}

/// Resolve the session token to the calling admin user
pub async fn authenticate(
    auth_coordinator: &AuthCoordinator,
    token: &SessionToken,
) -> Result<admin_user::Model, ApiError> {
    Ok(auth_coordinator.authenticate(Some(&token.0.key)).await?)
}

/// Build listing options from the query string
///
/// `start` defaults to 0 and `limit` to 10, both clamped to what SQL can bind;
/// any `order` other than `desc` is ascending.
pub fn list_params(
    start: Option<u64>,
    limit: Option<u64>,
    sort_by: Option<String>,
    order: Option<String>,
    search: Option<String>,
) -> ListParams {
    ListParams {
        sort_by,
        order: SortOrder::parse(order.as_deref()),
        search,
        ..ListParams::new(start.unwrap_or(0), limit.unwrap_or(DEFAULT_LIMIT))
    }
}

/// Missing security header, rejected by poem-openapi before the handler runs
pub async fn missing_token(_: AuthorizationError) -> Response {
    ApiError::unauthenticated("Missing token").into_response()
}

pub async fn invalid_payload(err: ParseRequestPayloadError) -> Response {
    let (field, message) = split_reason(&err.reason);
    ApiError::validation(&field, &message).into_response()
}

pub async fn invalid_param(err: ParseParamError) -> Response {
    ApiError::validation(&err.name, &err.reason).into_response()
}

/// Split a poem-openapi parse reason into the offending field and message
///
/// Reasons look like ``failed to parse "LoginRequest": field `email` verification failed. minLength(3)``;
/// anything without a backticked field is reported against `body`.
pub fn split_reason(reason: &str) -> (String, String) {
    let field = reason
        .split('`')
        .nth(1)
        .filter(|_| reason.matches('`').count() >= 2)
        .map(str::to_string);

    match field {
        Some(field) => {
            let message = reason
                .rsplit_once(&format!("`{}`", field))
                .map(|(_, rest)| rest.trim())
                .filter(|rest| !rest.is_empty())
                .unwrap_or(reason)
                .to_string();
            (field, message)
        }
        None => ("body".to_string(), reason.to_string()),
    }
}
