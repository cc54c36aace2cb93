use serde_json::json;

use crate::{
    dto::order::OrderRequest,
    error::AppResult,
    models::Order,
    request::ApiRequest,
    response::{ApiResponse, ErrorData},
    routes::params::OrderListParams,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/order",
    params(
        ("id" = Option<i32>, Query, description = "Single order of the caller"),
        ("page" = Option<u64>, Query, description = "Page number, 10 orders per page"),
        ("from_date" = Option<String>, Query, description = "YYYY-MM-DD, inclusive, default 1970-01-01"),
        ("to_date" = Option<String>, Query, description = "YYYY-MM-DD, inclusive, default today"),
    ),
    responses(
        (status = 200, description = "Order with details, or the caller's order history", body = Vec<Order>),
        (status = 400, description = "Invalid query parameter", body = ErrorData),
        (status = 404, description = "Order not found for the caller", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Order"
)]
pub async fn get(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let owner = req.user()?.user_uuid;
    let service = &state.services.orders;
    if let Some(id) = req.lookup_id("OrderId")? {
        return ApiResponse::ok(&service.get(owner, id).await?);
    }
    let params = OrderListParams::from_query(&req.query)?;
    ApiResponse::ok(&service.list(owner, &params).await?)
}

#[utoipa::path(
    post,
    path = "/order",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Created, returns `{\"OrderId\": n}`"),
        (status = 400, description = "Invalid order", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Order"
)]
pub async fn post(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let caller = req.user()?;
    let owner = caller.user_uuid;
    let input: OrderRequest = req.json()?;
    state.services.users.ensure_registered(caller).await?;
    let id = state.services.orders.create(owner, &input).await?;
    Ok(ApiResponse::json(json!({ "OrderId": id })))
}

#[utoipa::path(
    put,
    path = "/order/{id}",
    params(("id" = i32, Path, description = "Order id")),
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Replaced, returns `{\"OrderId\": n}`"),
        (status = 400, description = "Invalid order", body = ErrorData),
        (status = 404, description = "Order not found for the caller", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Order"
)]
pub async fn put(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let owner = req.user()?.user_uuid;
    let id = req.path_id("OrderId")?;
    let input: OrderRequest = req.json()?;
    state.services.orders.update(owner, id, &input).await?;
    Ok(ApiResponse::json(json!({ "OrderId": id })))
}

#[utoipa::path(
    delete,
    path = "/order/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Deleted, returns `{\"OrderId\": n}`"),
        (status = 404, description = "Order not found for the caller", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Order"
)]
pub async fn delete(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let owner = req.user()?.user_uuid;
    let id = req.path_id("OrderId")?;
    state.services.orders.delete(owner, id).await?;
    Ok(ApiResponse::json(json!({ "OrderId": id })))
}
