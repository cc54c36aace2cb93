use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorData {
    pub error: String,
}

/// Status code plus JSON body, the unit every entity handler produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok<T: Serialize>(data: &T) -> AppResult<Self> {
        let body = serde_json::to_value(data)
            .map_err(|err| AppError::Internal(anyhow::anyhow!("error converting to JSON: {err}")))?;
        Ok(Self {
            status: StatusCode::OK,
            body,
        })
    }

    pub fn json(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self {
            status,
            body: serde_json::json!({ "error": message }),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
