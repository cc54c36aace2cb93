use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims carried by the identity provider's bearer token.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    /// User UUID assigned by the identity provider.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    pub exp: usize,
}

fn default_role() -> String {
    "user".to_string()
}
