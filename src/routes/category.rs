use serde_json::json;

use crate::{
    dto::category::CategoryRequest,
    error::AppResult,
    models::Category,
    request::ApiRequest,
    response::{ApiResponse, ErrorData},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/category",
    params(
        ("id" = Option<i32>, Query, description = "Single category by id"),
        ("slug" = Option<String>, Query, description = "Categories whose path contains the slug"),
    ),
    responses(
        (status = 200, description = "Category or list of categories", body = Vec<Category>),
        (status = 400, description = "Invalid id", body = ErrorData),
        (status = 404, description = "Category not found", body = ErrorData),
    ),
    tag = "Category"
)]
pub async fn get(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let service = &state.services.categories;
    if let Some(id) = req.lookup_id("CategoryId")? {
        return ApiResponse::ok(&service.get(id).await?);
    }
    if let Some(slug) = req.query("slug") {
        return ApiResponse::ok(&service.find_by_slug(slug).await?);
    }
    ApiResponse::ok(&service.list().await?)
}

#[utoipa::path(
    post,
    path = "/category",
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Created, returns `{\"CategID\": n}`"),
        (status = 400, description = "Invalid body", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Category"
)]
pub async fn post(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let input: CategoryRequest = req.json()?;
    let id = state.services.categories.create(&input).await?;
    Ok(ApiResponse::json(json!({ "CategID": id })))
}

#[utoipa::path(
    put,
    path = "/category/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Updated, returns `{\"CategID\": n}`"),
        (status = 400, description = "Invalid id or body", body = ErrorData),
        (status = 404, description = "Category not found", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Category"
)]
pub async fn put(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let id = req.path_id("CategoryId")?;
    let input: CategoryRequest = req.json()?;
    state.services.categories.update(id, &input).await?;
    Ok(ApiResponse::json(json!({ "CategID": id })))
}

#[utoipa::path(
    delete,
    path = "/category/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Deleted, returns `{\"CategID\": n}`"),
        (status = 404, description = "Category not found", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Category"
)]
pub async fn delete(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let id = req.path_id("CategoryId")?;
    state.services.categories.delete(id).await?;
    Ok(ApiResponse::json(json!({ "CategID": id })))
}
