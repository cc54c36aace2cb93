use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddressRequest {
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
