use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

/// Product body for create and partial update. Zero and empty values mean
/// "not provided" and are left out of the written columns.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductRequest {
    #[serde(rename = "prodTitle")]
    pub title: String,
    #[serde(rename = "prodDescription")]
    pub description: String,
    #[serde(rename = "prodPrice")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(rename = "prodStock")]
    pub stock: i32,
    #[serde(rename = "prodCategId")]
    pub category_id: i32,
    #[serde(rename = "prodPath")]
    pub path: String,
}

impl ProductRequest {
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self.description.trim().is_empty()
            && self.price.is_zero()
            && self.stock == 0
            && self.category_id == 0
            && self.path.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct StockUpdateRequest {
    pub delta: i32,
}
