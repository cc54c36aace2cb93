use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserUpdateRequest {
    #[serde(rename = "userFirstName")]
    pub first_name: String,
    #[serde(rename = "userLastName")]
    pub last_name: String,
}
