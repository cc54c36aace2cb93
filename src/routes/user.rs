use serde_json::json;

use crate::{
    dto::user::UserUpdateRequest,
    error::AppResult,
    models::User,
    request::ApiRequest,
    response::{ApiResponse, ErrorData},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/user",
    responses(
        (status = 200, description = "The caller's user record", body = User),
        (status = 404, description = "User not registered", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn get(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let uuid = req.user()?.user_uuid;
    ApiResponse::ok(&state.services.users.get(uuid).await?)
}

#[utoipa::path(
    post,
    path = "/user",
    responses(
        (status = 200, description = "Returns `{\"UserUUID\": uuid, \"created\": bool}`"),
        (status = 400, description = "Token carries no email", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn post(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let user = req.user()?;
    let created = state.services.users.register(user).await?;
    Ok(ApiResponse::json(
        json!({ "UserUUID": user.user_uuid, "created": created }),
    ))
}

#[utoipa::path(
    put,
    path = "/user",
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "Updated, returns `{\"UserUUID\": uuid}`"),
        (status = 400, description = "No name given", body = ErrorData),
        (status = 404, description = "User not registered", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "User"
)]
pub async fn put(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let uuid = req.user()?.user_uuid;
    let input: UserUpdateRequest = req.json()?;
    state.services.users.update(uuid, &input).await?;
    Ok(ApiResponse::json(json!({ "UserUUID": uuid })))
}
