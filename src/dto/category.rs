use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CategoryRequest {
    #[serde(rename = "categName")]
    pub name: String,
    #[serde(rename = "categPath")]
    pub path: String,
}
