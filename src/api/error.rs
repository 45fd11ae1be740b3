//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::analysis::AnalysisError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing multipart field: {0}")]
    MissingField(&'static str),
    #[error("Invalid multipart payload: {0}")]
    InvalidMultipart(String),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_FIELD",
                format!("Multipart field '{field}' is required"),
            ),
            ApiError::InvalidMultipart(detail) => (
                StatusCode::BAD_REQUEST,
                "MULTIPART_INVALID",
                detail.clone(),
            ),
            ApiError::Analysis(err) => {
                let (status, code) = match err {
                    AnalysisError::EmptyUpload => (StatusCode::BAD_REQUEST, "EMPTY_UPLOAD"),
                    AnalysisError::TooSmall(_) => (StatusCode::BAD_REQUEST, "IMAGE_TOO_SMALL"),
                    AnalysisError::TooLarge(_) => {
                        (StatusCode::PAYLOAD_TOO_LARGE, "IMAGE_TOO_LARGE")
                    }
                    AnalysisError::Decode(_) => (StatusCode::BAD_REQUEST, "DECODE_FAILED"),
                    AnalysisError::EmptyImage => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_IMAGE")
                    }
                };
                (status, code, err.to_string())
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn missing_field_returns_400() {
        let response = ApiError::MissingField("data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "MISSING_FIELD");
        assert!(json["error"]["message"].as_str().unwrap().contains("data"));
    }

    #[tokio::test]
    async fn invalid_multipart_returns_400() {
        let response =
            ApiError::InvalidMultipart("unexpected end of stream".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "MULTIPART_INVALID");
    }

    #[tokio::test]
    async fn empty_upload_returns_400() {
        let response = ApiError::from(AnalysisError::EmptyUpload).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EMPTY_UPLOAD");
    }

    #[tokio::test]
    async fn undersized_image_returns_400() {
        let response = ApiError::from(AnalysisError::TooSmall(4)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "IMAGE_TOO_SMALL");
    }

    #[tokio::test]
    async fn oversized_image_returns_413() {
        let response =
            ApiError::from(AnalysisError::TooLarge(99_000_000)).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "IMAGE_TOO_LARGE");
    }

    #[tokio::test]
    async fn decode_failure_returns_400() {
        let err = image::load_from_memory(&[0u8; 32]).unwrap_err();
        let response = ApiError::from(AnalysisError::Decode(err)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "DECODE_FAILED");
        assert!(json["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn degenerate_image_returns_422() {
        let response = ApiError::from(AnalysisError::EmptyImage).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "EMPTY_IMAGE");
    }

    #[tokio::test]
    async fn internal_returns_500_and_hides_detail() {
        let response = ApiError::Internal("worker thread panicked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INTERNAL");
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }
}
