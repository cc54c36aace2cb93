use serde_json::json;

use crate::{
    dto::address::AddressRequest,
    error::AppResult,
    models::Address,
    request::ApiRequest,
    response::{ApiResponse, ErrorData},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/address",
    params(("id" = Option<i32>, Query, description = "Single address of the caller")),
    responses(
        (status = 200, description = "Address or every address of the caller", body = Vec<Address>),
        (status = 404, description = "Address not found", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Address"
)]
pub async fn get(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let owner = req.user()?.user_uuid;
    let service = &state.services.addresses;
    match req.lookup_id("AddressId")? {
        Some(id) => ApiResponse::ok(&service.get(owner, id).await?),
        None => ApiResponse::ok(&service.list(owner).await?),
    }
}

#[utoipa::path(
    post,
    path = "/address",
    request_body = AddressRequest,
    responses(
        (status = 200, description = "Created, returns `{\"AddressID\": n}`"),
        (status = 400, description = "Missing field", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Address"
)]
pub async fn post(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let caller = req.user()?;
    let owner = caller.user_uuid;
    let input: AddressRequest = req.json()?;
    state.services.users.ensure_registered(caller).await?;
    let id = state.services.addresses.create(owner, &input).await?;
    Ok(ApiResponse::json(json!({ "AddressID": id })))
}

#[utoipa::path(
    put,
    path = "/address/{id}",
    params(("id" = i32, Path, description = "Address id")),
    request_body = AddressRequest,
    responses(
        (status = 200, description = "Updated, returns `{\"AddressID\": n}`"),
        (status = 400, description = "Missing field", body = ErrorData),
        (status = 404, description = "Address not found for the caller", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Address"
)]
pub async fn put(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let owner = req.user()?.user_uuid;
    let id = req.path_id("AddressId")?;
    let input: AddressRequest = req.json()?;
    state.services.addresses.update(owner, id, &input).await?;
    Ok(ApiResponse::json(json!({ "AddressID": id })))
}

#[utoipa::path(
    delete,
    path = "/address/{id}",
    params(("id" = i32, Path, description = "Address id")),
    responses(
        (status = 200, description = "Deleted, returns `{\"AddressID\": n}`"),
        (status = 404, description = "Address not found for the caller", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Address"
)]
pub async fn delete(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let owner = req.user()?.user_uuid;
    let id = req.path_id("AddressId")?;
    state.services.addresses.delete(owner, id).await?;
    Ok(ApiResponse::json(json!({ "AddressID": id })))
}
