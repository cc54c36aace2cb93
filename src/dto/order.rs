use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct OrderRequest {
    #[serde(rename = "orderAddId")]
    pub address_id: i32,
    #[serde(rename = "orderTotal")]
    #[schema(value_type = f64)]
    pub total: Decimal,
    #[serde(rename = "orderDetails")]
    pub details: Vec<OrderDetailRequest>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct OrderDetailRequest {
    #[serde(rename = "odProdId")]
    pub product_id: i32,
    #[serde(rename = "odQuantity")]
    pub quantity: i32,
    #[serde(rename = "odPrice")]
    #[schema(value_type = f64)]
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    #[test]
    fn serializes_with_wire_names() {
        let input = OrderRequest {
            address_id: 3,
            total: Decimal::new(5000, 2),
            details: vec![OrderDetailRequest {
                product_id: 7,
                quantity: 2,
                price: Decimal::new(2500, 2),
            }],
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "orderAddId": 3,
                "orderTotal": 50.0,
                "orderDetails": [{ "odProdId": 7, "odQuantity": 2, "odPrice": 25.0 }],
            })
        );
    }
}
