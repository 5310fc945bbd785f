use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{config::Config, err_responses::WebhookError};

use super::verify::signature_matches;

pub async fn ver_sig(
    State(config): State<Config>,
    req: Request,
    next: Next,
) -> Result<Response, Response> {
    let (parts, body) = req.into_parts();

    let signature = parts
        .headers
        .get("x-razorpay-signature")
        .ok_or_else(|| WebhookError::MissingSignature.into_response())?
        .to_str()
        .map_err(|_| WebhookError::InvalidSignature.into_response())?
        .to_owned();

    let secret = config.webhook_secret.ok_or_else(|| {
        tracing::error!("RAZORPAY_WEBHOOK_SECRET is not configured");
        WebhookError::MissingSecret.into_response()
    })?;

    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.map_err(|err| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response()
    })?;

    if !signature_matches(&body_bytes, &signature, &secret) {
        tracing::warn!("rejected webhook delivery with invalid signature");
        return Err(WebhookError::InvalidSignature.into_response());
    }

    Ok(next
        .run(Request::from_parts(parts, Body::from(body_bytes)))
        .await)
}
