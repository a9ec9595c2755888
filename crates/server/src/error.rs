//! Unified error handling for the API.
//!
//! Every error response uses the `{ "success": false, "error": ... }`
//! envelope. Server-side failures are captured to Sentry and logged with
//! full detail, but the client only ever sees a generic message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use order_concierge_core::LookupError;
use serde::Serialize;
use thiserror::Error;

use crate::services::email::EmailError;
use crate::shopify::ShopifyError;

/// Message returned for any failure the caller cannot fix.
pub const GENERIC_ERROR_MESSAGE: &str =
    "Something went wrong while looking that up. Please try again shortly.";

/// Application-level error type for API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input failed validation.
    #[error("{0}")]
    Validation(String),

    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// Escalation email could not be sent.
    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    /// A feature is not configured on this deployment.
    #[error("{0}")]
    Unavailable(&'static str),
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        Self::Validation("Request body must be valid JSON.".to_string())
    }
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Shopify(_) | Self::Email(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Shopify(_) | Self::Email(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        // Don't expose upstream error details to clients
        let error = match &self {
            Self::Shopify(_) | Self::Email(_) => GENERIC_ERROR_MESSAGE.to_string(),
            _ => self.to_string(),
        };

        (
            self.status(),
            Json(ErrorBody {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_envelope() {
        let (status, json) = body_json(ApiError::from(LookupError::InvalidPhone)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "Invalid phone number. Please provide at least 10 digits."
        );
    }

    #[tokio::test]
    async fn test_upstream_error_is_generic() {
        let err = ApiError::from(ShopifyError::Unauthorized("token shpat_abc revoked".to_string()));
        let (status, json) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], GENERIC_ERROR_MESSAGE);
        assert!(!json.to_string().contains("shpat_abc"));
    }

    #[tokio::test]
    async fn test_unavailable_error() {
        let (status, json) =
            body_json(ApiError::Unavailable("Support escalation is not available.")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"], "Support escalation is not available.");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Shopify(ShopifyError::RateLimited(1)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
