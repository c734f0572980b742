use crate::domain::money::normalize_currency;
use rust_decimal::Decimal;
use serde::Serialize;

pub const PAYMENT_NOT_FOUND: &str = "Payment not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Succeeded,
    Failed,
    Pending,
    NotFound,
    Error,
}

impl PaymentStatus {
    pub fn from_network(raw: &str) -> Self {
        match raw {
            "succeeded" => PaymentStatus::Succeeded,
            "canceled" | "requires_payment_method" => PaymentStatus::Failed,
            // processing, requires_action and anything the network adds later
            _ => PaymentStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Succeeded => "Succeeded",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::NotFound => "NotFound",
            PaymentStatus::Error => "Error",
        }
    }
}

/// `amount` is always in major units and `currency` upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOutcome {
    pub success: bool,
    pub payment_id: String,
    pub transaction_id: String,
    pub status: PaymentStatus,
    pub amount: Decimal,
    pub currency: String,
    pub error_message: Option<String>,
    pub client_secret: Option<String>,
}

impl PaymentOutcome {
    pub fn succeeded(
        payment_id: impl Into<String>,
        transaction_id: impl Into<String>,
        amount: Decimal,
        currency: &str,
    ) -> Self {
        Self {
            success: true,
            payment_id: payment_id.into(),
            transaction_id: transaction_id.into(),
            status: PaymentStatus::Succeeded,
            amount,
            currency: normalize_currency(currency),
            error_message: None,
            client_secret: None,
        }
    }

    pub fn failed(amount: Decimal, currency: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            payment_id: String::new(),
            transaction_id: String::new(),
            status: PaymentStatus::Failed,
            amount,
            currency: normalize_currency(currency),
            error_message: Some(message.into()),
            client_secret: None,
        }
    }

    pub fn not_found(payment_id: &str) -> Self {
        Self {
            success: false,
            payment_id: payment_id.to_string(),
            transaction_id: String::new(),
            status: PaymentStatus::NotFound,
            amount: Decimal::ZERO,
            currency: String::new(),
            error_message: Some(PAYMENT_NOT_FOUND.to_string()),
            client_secret: None,
        }
    }

    pub fn lookup_error(payment_id: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            payment_id: payment_id.to_string(),
            transaction_id: String::new(),
            status: PaymentStatus::Error,
            amount: Decimal::ZERO,
            currency: String::new(),
            error_message: Some(message.into()),
            client_secret: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == PaymentStatus::NotFound
    }
}

pub fn network_status_note(raw_status: &str) -> Option<String> {
    (raw_status != "succeeded").then(|| format!("payment status: {}", raw_status))
}
