mod auth;
mod payment_captured;
mod request_payload;
mod verify;

use axum::{middleware::from_fn_with_state, routing::post, Router};

pub fn router(state: crate::AppState) -> Router {
    Router::new()
        .route(
            "/webhook",
            post(payment_captured::webhook_handler)
                .route_layer(from_fn_with_state(state.config.clone(), auth::ver_sig)),
        )
        .with_state(state)
}
