use serde_json::json;

use crate::{
    dto::product::StockUpdateRequest,
    error::AppResult,
    request::ApiRequest,
    response::{ApiResponse, ErrorData},
    state::AppState,
};

#[utoipa::path(
    put,
    path = "/stock/{productId}",
    params(("productId" = i32, Path, description = "Product id")),
    request_body = StockUpdateRequest,
    responses(
        (status = 200, description = "Stock adjusted, returns `{\"ProductID\": n, \"delta\": d}`"),
        (status = 400, description = "Invalid id or zero delta", body = ErrorData),
        (status = 404, description = "Product not found", body = ErrorData),
    ),
    security(("bearer_auth" = [])),
    tag = "Stock"
)]
pub async fn put(state: &AppState, req: &ApiRequest) -> AppResult<ApiResponse> {
    let product_id = req.path_id("ProductId")?;
    let input: StockUpdateRequest = req.json()?;
    state.services.stock.adjust(product_id, input.delta).await?;
    Ok(ApiResponse::json(
        json!({ "ProductID": product_id, "delta": input.delta }),
    ))
}
