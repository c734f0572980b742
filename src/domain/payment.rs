use crate::domain::money::is_valid_currency;
use crate::domain::outcome::{PaymentOutcome, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "EUR".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub order_id: String,
    pub payment_method_id: Option<String>,
    pub customer_email: Option<String>,
    pub description: Option<String>,
}

impl PaymentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount < Decimal::new(1, 2) {
            return Err("Amount must be at least 0.01".to_string());
        }
        if !is_valid_currency(&self.currency) {
            return Err("Currency must be a 3-letter code".to_string());
        }
        if self.order_id.trim().is_empty() {
            return Err("OrderId is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub payment_intent_id: String,
    pub status: PaymentStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub order_id: String,
    pub processed_at: chrono::DateTime<chrono::Utc>,
    pub error_message: Option<String>,
    pub transaction_id: Option<String>,
    pub client_secret: Option<String>,
}

impl PaymentResponse {
    /// `order_id` is empty for status lookups, which are not tied to an order.
    pub fn from_outcome(outcome: PaymentOutcome, order_id: &str) -> Self {
        Self {
            payment_intent_id: outcome.payment_id,
            status: outcome.status,
            amount: outcome.amount,
            currency: outcome.currency,
            order_id: order_id.to_string(),
            processed_at: chrono::Utc::now(),
            error_message: outcome.error_message,
            transaction_id: Some(outcome.transaction_id).filter(|id| !id.is_empty()),
            client_secret: outcome.client_secret,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorPayload {
                code: code.to_string(),
                message: message.into(),
                details: None,
            },
        }
    }
}
