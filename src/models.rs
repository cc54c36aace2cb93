use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    #[serde(rename = "categID")]
    pub id: i32,
    #[serde(rename = "categName")]
    pub name: String,
    #[serde(rename = "categPath")]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(rename = "prodID")]
    pub id: i32,
    #[serde(rename = "prodTitle")]
    pub title: String,
    #[serde(rename = "prodDescription")]
    pub description: Option<String>,
    #[serde(rename = "prodCreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "prodUpdated")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(rename = "prodPrice")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(rename = "prodStock")]
    pub stock: i32,
    #[serde(rename = "prodCategId")]
    pub category_id: Option<i32>,
    #[serde(rename = "prodPath")]
    pub path: Option<String>,
    /// Path of the owning category, joined on read.
    #[serde(rename = "categPath")]
    pub category_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    #[serde(rename = "addId")]
    pub id: i32,
    #[serde(rename = "addTitle")]
    pub title: String,
    #[serde(rename = "addName")]
    pub name: String,
    #[serde(rename = "addAddress")]
    pub address: String,
    #[serde(rename = "addCity")]
    pub city: String,
    #[serde(rename = "addState")]
    pub state: String,
    #[serde(rename = "addPostalCode")]
    pub postal_code: String,
    #[serde(rename = "addPhone")]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[serde(rename = "orderId")]
    pub id: i32,
    #[serde(rename = "orderUserUUID")]
    pub user_uuid: Uuid,
    #[serde(rename = "orderAddId")]
    pub address_id: i32,
    #[serde(rename = "orderDate")]
    pub date: DateTime<Utc>,
    #[serde(rename = "orderTotal")]
    #[schema(value_type = f64)]
    pub total: Decimal,
    #[serde(rename = "orderDetails")]
    pub details: Vec<OrderDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderDetail {
    #[serde(rename = "odId")]
    pub id: i32,
    #[serde(rename = "odOrderId")]
    pub order_id: i32,
    #[serde(rename = "odProdId")]
    pub product_id: i32,
    #[serde(rename = "odQuantity")]
    pub quantity: i32,
    #[serde(rename = "odPrice")]
    #[schema(value_type = f64)]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "userUUID")]
    pub uuid: Uuid,
    #[serde(rename = "userEmail")]
    pub email: String,
    #[serde(rename = "userFirstName")]
    pub first_name: Option<String>,
    #[serde(rename = "userLastName")]
    pub last_name: Option<String>,
    #[serde(rename = "userStatus")]
    pub status: i32,
    #[serde(rename = "userDateAdd")]
    pub date_add: DateTime<Utc>,
    #[serde(rename = "userDateUpg")]
    pub date_upg: Option<DateTime<Utc>>,
}
