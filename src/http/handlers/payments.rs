use crate::domain::payment::{ErrorEnvelope, PaymentRequest, PaymentResponse};
use crate::gateways::{ChargeRequest, PaymentGateway};
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_payment(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> impl IntoResponse {
    if let Err(message) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorEnvelope::new("VALIDATION_ERROR", message)),
        )
            .into_response();
    }

    tracing::info!(
        order_id = %req.order_id,
        amount = %req.amount,
        currency = %req.currency,
        gateway = state.gateway.name(),
        "processing payment"
    );

    let charge = ChargeRequest::new(req.amount, req.currency.clone(), req.order_id.clone())
        .with_payment_method(req.payment_method_id)
        .with_customer_email(req.customer_email)
        .with_description(req.description);
    let outcome = state.gateway.charge(charge).await;

    let status = if outcome.success {
        tracing::info!(payment_id = %outcome.payment_id, "payment succeeded");
        StatusCode::OK
    } else {
        tracing::warn!(
            order_id = %req.order_id,
            error = outcome.error_message.as_deref().unwrap_or_default(),
            "payment failed"
        );
        StatusCode::BAD_REQUEST
    };

    (status, Json(PaymentResponse::from_outcome(outcome, &req.order_id))).into_response()
}

pub async fn get_payment_status(
    State(state): State<AppState>,
    Path(payment_id): Path<String>,
) -> impl IntoResponse {
    tracing::info!(payment_id = %payment_id, "getting payment status");

    let outcome = state.gateway.get_status(&payment_id).await;
    if outcome.is_not_found() {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorEnvelope::new(
                "PAYMENT_NOT_FOUND",
                format!("Payment {} not found", payment_id),
            )),
        )
            .into_response();
    }

    (StatusCode::OK, Json(PaymentResponse::from_outcome(outcome, ""))).into_response()
}

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "PaymentService",
            "timestamp": chrono::Utc::now(),
        })),
    )
}
