use serde_json::json;

use crate::{
    dto::product::ProductRequest,
    error::AppResult,
    models::Product,
    request::{ApiRequest, parse_id},
    response::{ApiResponse, ErrorData},
    routes::params::{ListParams, ProductSortBy},
    state::AppState,
};

/// Query selectors are tried in order: `id`, `slug`, `search`, `categId`,
/// `slugCateg`, then the paginated listing.
#[utoipa::path(
    get,
    path = "/product",
    params(
        ("id" = Option<i32>, Query, description = "Single product by id"),
        ("slug" = Option<String>, Query, description = "Single product by exact path"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on title or description"),
        ("categId" = Option<i32>, Query, description = "Products of one category"),
        ("slugCateg" = Option<String>, Query, description = "Products of the category with this path"),
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("limit" = Option<u64>, Query, description = "Items per page, default 10"),
        ("sort_by" = Option<String>, Query, description = "id, title, description, price, category_id, stock or created_at"),
        ("order" = Option<String>, Query, description = "ASC or DESC"),
    ),
    responses(
        (status = 200, description = "Product or list of products", body = Vec<Product>),
        (status = 400, description = "Invalid query parameter", body = ErrorData),
        (status = 404, description = "Product not found", body = ErrorData),
    ),
    tag = "Product"
)]
pub async fn get(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let service = &state.services.products;

    if let Some(id) = req.lookup_id("'id' parameter")? {
        return ApiResponse::ok(&service.get_by_id(id).await?);
    }
    if let Some(slug) = req.query("slug") {
        return ApiResponse::ok(&service.get_by_slug(slug).await?);
    }
    if let Some(search) = req.query("search") {
        let params = ListParams::<ProductSortBy>::from_query(&req.query)?;
        return ApiResponse::ok(&service.search(search, &params).await?);
    }
    if let Some(raw) = req.query("categId") {
        let category_id = parse_id(raw, "'categId' parameter")?;
        return ApiResponse::ok(&service.list_by_category_id(category_id).await?);
    }
    if let Some(slug) = req.query("slugCateg") {
        return ApiResponse::ok(&service.list_by_category_slug(slug).await?);
    }

    let params = ListParams::<ProductSortBy>::from_query(&req.query)?;
    ApiResponse::ok(&service.list(&params).await?)
}

#[utoipa::path(
    post,
    path = "/product",
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Created, returns `{\"ProductID\": n}`"),
        (status = 400, description = "Invalid body", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Product"
)]
pub async fn post(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let input: ProductRequest = req.json()?;
    let id = state.services.products.create(&input).await?;
    Ok(ApiResponse::json(json!({ "ProductID": id })))
}

#[utoipa::path(
    put,
    path = "/product/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Updated, returns `{\"ProductID\": n}`"),
        (status = 400, description = "Invalid id or empty body", body = ErrorData),
        (status = 404, description = "Product not found", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Product"
)]
pub async fn put(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let id = req.path_id("ProductId")?;
    let input: ProductRequest = req.json()?;
    state.services.products.update(id, &input).await?;
    Ok(ApiResponse::json(json!({ "ProductID": id })))
}

#[utoipa::path(
    delete,
    path = "/product/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Deleted, returns `{\"ProductID\": n}`"),
        (status = 404, description = "Product not found", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Product"
)]
pub async fn delete(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let id = req.path_id("ProductId")?;
    state.services.products.delete(id).await?;
    Ok(ApiResponse::json(json!({ "ProductID": id })))
}
