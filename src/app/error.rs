use crate::utils::error::StudyBuddyError;
use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(StudyBuddyError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for StudyBuddyError {
    fn from(rejection: JsonRejection) -> Self {
        StudyBuddyError::validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for StudyBuddyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = json!({
            "success": false,
            "error": self.user_friendly_message(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_error_response_shape() {
        let response = StudyBuddyError::not_found("Quiz not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"success": false, "error": "Quiz not found"}));
    }

    #[tokio::test]
    async fn test_llm_error_is_internal() {
        let response = StudyBuddyError::LlmError {
            status: 401,
            message: "Invalid API Key".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
