use crate::domain::payment::ErrorEnvelope;
use crate::http::handlers::payments;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    with_layers(
        Router::new()
            .route("/api/payments", post(payments::create_payment))
            .route("/api/payments/health", get(payments::health))
            .route("/api/payments/:payment_id", get(payments::get_payment_status))
            .with_state(state),
    )
}

pub fn with_layers(routes: Router) -> Router {
    routes
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods(cors::Any)
                .allow_headers(cors::Any),
        )
}

fn internal_error(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("unexpected failure while handling payment request");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope::new(
            "INTERNAL_ERROR",
            "Internal server error processing payment",
        )),
    )
        .into_response()
}
