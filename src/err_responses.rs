use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::sanity::StoreError;

/// Everything that can end a webhook delivery early. All variants surface as
/// a 400 so the gateway records the delivery as failed and retries on its own
/// schedule; nothing here is retried in-process.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("No Signature found for Razorpay")]
    MissingSignature,
    #[error("Razorpay webhook secret is not set")]
    MissingSecret,
    #[error("Invalid signature")]
    InvalidSignature,
    #[error("Webhook Error: {0}")]
    MalformedPayload(serde_json::Error),
    #[error("Invalid address JSON in payment notes: {0}")]
    MalformedAddress(serde_json::Error),
    #[error("Error creating order: {0}")]
    StoreWriteFailed(#[from] StoreError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
