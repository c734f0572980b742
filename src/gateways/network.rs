use crate::domain::money::{from_minor_units, normalize_currency, to_minor_units};
use crate::domain::outcome::{network_status_note, PaymentOutcome, PaymentStatus};
use crate::gateways::{ChargeRequest, GatewayError, PaymentGateway};
use reqwest::{StatusCode, Url};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const MISSING_PAYMENT_METHOD: &str =
    "payment method reference is required to confirm a network charge";

#[derive(Debug, Clone)]
pub struct NetworkSettings {
    pub secret_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

/// Charges through a PaymentIntents-style payment network API.
pub struct NetworkGateway {
    base_url: Url,
    secret_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PaymentIntent {
    id: String,
    status: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    client_secret: Option<String>,
}

impl PaymentIntent {
    fn into_outcome(self, amount: Decimal, currency: &str) -> PaymentOutcome {
        PaymentOutcome {
            success: self.status == "succeeded",
            status: PaymentStatus::from_network(&self.status),
            error_message: network_status_note(&self.status),
            payment_id: self.id.clone(),
            transaction_id: self.id,
            amount,
            currency: normalize_currency(currency),
            client_secret: self.client_secret,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NetworkErrorEnvelope {
    error: NetworkErrorBody,
}

#[derive(Debug, Deserialize)]
struct NetworkErrorBody {
    message: Option<String>,
    code: Option<String>,
    decline_code: Option<String>,
}

enum CallError {
    Rejected { status: StatusCode, message: String },
    Transport(reqwest::Error),
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::Rejected { message, .. } => f.write_str(message),
            CallError::Transport(e) if e.is_timeout() => f.write_str("payment network request timed out"),
            CallError::Transport(e) => write!(f, "{}", e),
        }
    }
}

fn rejection_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<NetworkErrorEnvelope>(body).ok();
    match parsed {
        Some(NetworkErrorEnvelope {
            error: NetworkErrorBody {
                message: Some(message),
                ..
            },
        }) => message,
        Some(NetworkErrorEnvelope { error }) => {
            let code = error.decline_code.or(error.code);
            match code {
                Some(code) => format!("network returned HTTP {} ({})", status.as_u16(), code),
                None => format!("network returned HTTP {}", status.as_u16()),
            }
        }
        None => format!("network returned HTTP {}", status.as_u16()),
    }
}

impl NetworkGateway {
    pub fn new(settings: NetworkSettings) -> Result<Self, GatewayError> {
        let secret_key = settings.secret_key.trim().to_string();
        if secret_key.is_empty() {
            return Err(GatewayError::MissingCredential);
        }

        let base_url = Url::parse(&settings.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| GatewayError::InvalidBaseUrl(settings.base_url.clone()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.timeout)
            .build()?;

        Ok(Self {
            base_url,
            secret_key,
            timeout: settings.timeout,
            client,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<PaymentIntent, CallError> {
        let resp = request
            .bearer_auth(&self.secret_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(CallError::Transport)?;

        let status = resp.status();
        if status.is_success() {
            return resp.json::<PaymentIntent>().await.map_err(CallError::Transport);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(CallError::Rejected {
            status,
            message: rejection_message(status, &body),
        })
    }
}

#[async_trait::async_trait]
impl PaymentGateway for NetworkGateway {
    fn name(&self) -> &'static str {
        "network"
    }

    async fn charge(&self, request: ChargeRequest) -> PaymentOutcome {
        let payment_method = match request
            .payment_method_ref
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(pm) => pm.to_string(),
            None => {
                tracing::warn!(order_id = %request.order_id, "network charge without payment method");
                return PaymentOutcome::failed(request.amount, &request.currency, MISSING_PAYMENT_METHOD);
            }
        };

        let Some(amount_minor) = to_minor_units(request.amount).filter(|minor| *minor > 0) else {
            return PaymentOutcome::failed(
                request.amount,
                &request.currency,
                format!("amount {} is not a positive number of minor units", request.amount),
            );
        };

        let mut form: Vec<(&str, String)> = vec![
            ("amount", amount_minor.to_string()),
            ("currency", request.currency.trim().to_ascii_lowercase()),
            (
                "description",
                request
                    .description
                    .clone()
                    .unwrap_or_else(|| format!("Order {}", request.order_id)),
            ),
            ("payment_method", payment_method),
            ("confirm", "true".to_string()),
            ("payment_method_types[]", "card".to_string()),
            ("metadata[order_id]", request.order_id.clone()),
        ];
        if let Some(email) = &request.customer_email {
            form.push(("receipt_email", email.clone()));
        }

        let call = self
            .client
            .post(self.endpoint(&["v1", "payment_intents"]))
            .form(&form);

        match self.send(call).await {
            Ok(intent) => {
                tracing::info!(
                    gateway = "network",
                    order_id = %request.order_id,
                    payment_id = %intent.id,
                    network_status = %intent.status,
                    "network charge processed"
                );
                intent.into_outcome(request.amount, &request.currency)
            }
            Err(err) => {
                tracing::error!(
                    gateway = "network",
                    order_id = %request.order_id,
                    error = %err,
                    "network charge failed"
                );
                PaymentOutcome::failed(request.amount, &request.currency, err.to_string())
            }
        }
    }

    async fn get_status(&self, payment_id: &str) -> PaymentOutcome {
        if payment_id.trim().is_empty() {
            return PaymentOutcome::not_found(payment_id);
        }

        let call = self
            .client
            .get(self.endpoint(&["v1", "payment_intents", payment_id]));

        match self.send(call).await {
            Ok(intent) => {
                let amount = from_minor_units(intent.amount);
                let currency = intent.currency.clone();
                intent.into_outcome(amount, &currency)
            }
            Err(CallError::Rejected { status, .. }) if status == StatusCode::NOT_FOUND => {
                PaymentOutcome::not_found(payment_id)
            }
            Err(err) => {
                tracing::error!(
                    gateway = "network",
                    payment_id = %payment_id,
                    error = %err,
                    "failed to get payment status"
                );
                PaymentOutcome::lookup_error(payment_id, err.to_string())
            }
        }
    }
}
