use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::utils::error::{ErrorCategory, ScribeError};

impl IntoResponse for ScribeError {
    fn into_response(self) -> Response {
        let status = match self.category() {
            ErrorCategory::Input => StatusCode::BAD_REQUEST,
            ErrorCategory::Runtime if matches!(self, ScribeError::ReferralCodeExhausted { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        (status, Json(json!({ "error": self.user_friendly_message() }))).into_response()
    }
}
