use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::ensure_admin,
    models::User,
    request::ApiRequest,
    response::{ApiResponse, ErrorData},
    routes::params::{ListParams, UserSortBy},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/admin/users",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Items per page, default 10"),
        ("sort_by" = Option<String>, Query, description = "uuid, email, first_name, last_name, status, date_add or date_upg"),
        ("order" = Option<String>, Query, description = "ASC or DESC"),
    ),
    responses(
        (status = 200, description = "Users", body = Vec<User>),
        (status = 400, description = "Invalid query parameter", body = ErrorData),
        (status = 401, description = "Caller is not an administrator", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let caller = req.user()?;
    let params = ListParams::<UserSortBy>::from_query(&req.query)?;
    ApiResponse::ok(&state.services.admin_users.list(caller, &params).await?)
}

#[utoipa::path(
    delete,
    path = "/admin/users/{uuid}",
    params(("uuid" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Deleted, returns `{\"UserUUID\": uuid}`"),
        (status = 400, description = "Not a UUID", body = ErrorData),
        (status = 401, description = "Caller is not an administrator", body = ErrorData),
        (status = 404, description = "User not found", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let caller = req.user()?;
    ensure_admin(caller)?;
    let raw = req.resource_id.as_deref().unwrap_or_default();
    let uuid = Uuid::parse_str(raw.trim())
        .map_err(|err| AppError::BadRequest(format!("Invalid user UUID: {err}")))?;
    state.services.admin_users.delete(caller, uuid).await?;
    Ok(ApiResponse::json(json!({ "UserUUID": uuid })))
}
