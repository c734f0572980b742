use crate::config::AppConfig;
use crate::domain::outcome::PaymentOutcome;
use rust_decimal::Decimal;
use std::time::Duration;

pub mod network;
pub mod simulator;

use network::{NetworkGateway, NetworkSettings};
use simulator::SimulatorGateway;

#[derive(Debug, Clone)]
pub struct ChargeRequest {
    pub amount: Decimal,
    pub currency: String,
    pub order_id: String,
    pub payment_method_ref: Option<String>,
    pub customer_email: Option<String>,
    pub description: Option<String>,
}

impl ChargeRequest {
    pub fn new(amount: Decimal, currency: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            order_id: order_id.into(),
            payment_method_ref: None,
            customer_email: None,
            description: None,
        }
    }

    pub fn with_payment_method(mut self, payment_method_ref: Option<String>) -> Self {
        self.payment_method_ref = payment_method_ref;
        self
    }

    pub fn with_customer_email(mut self, customer_email: Option<String>) -> Self {
        self.customer_email = customer_email;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Raised only while building a gateway; per-call failures are outcomes.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("payment network secret key is not configured")]
    MissingCredential,
    #[error("invalid payment network base url `{0}`")]
    InvalidBaseUrl(String),
    #[error("failed to build payment network http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &'static str;

    /// Declines and transport failures come back as `success == false`.
    async fn charge(&self, request: ChargeRequest) -> PaymentOutcome;

    async fn get_status(&self, payment_id: &str) -> PaymentOutcome;
}

pub enum ConfiguredGateway {
    Simulator(SimulatorGateway),
    Network(NetworkGateway),
}

impl ConfiguredGateway {
    pub fn from_config(cfg: &AppConfig) -> Result<Self, GatewayError> {
        if cfg.use_simulator {
            return Ok(ConfiguredGateway::Simulator(SimulatorGateway::with_latency(
                Duration::from_millis(cfg.simulator_charge_latency_ms),
                Duration::from_millis(cfg.simulator_status_latency_ms),
            )));
        }

        let secret_key = cfg
            .network_secret_key
            .clone()
            .ok_or(GatewayError::MissingCredential)?;
        let gateway = NetworkGateway::new(NetworkSettings {
            secret_key,
            base_url: cfg.network_base_url.clone(),
            timeout: Duration::from_millis(cfg.network_timeout_ms),
        })?;
        Ok(ConfiguredGateway::Network(gateway))
    }
}

#[async_trait::async_trait]
impl PaymentGateway for ConfiguredGateway {
    fn name(&self) -> &'static str {
        match self {
            ConfiguredGateway::Simulator(g) => g.name(),
            ConfiguredGateway::Network(g) => g.name(),
        }
    }

    async fn charge(&self, request: ChargeRequest) -> PaymentOutcome {
        match self {
            ConfiguredGateway::Simulator(g) => g.charge(request).await,
            ConfiguredGateway::Network(g) => g.charge(request).await,
        }
    }

    async fn get_status(&self, payment_id: &str) -> PaymentOutcome {
        match self {
            ConfiguredGateway::Simulator(g) => g.get_status(payment_id).await,
            ConfiguredGateway::Network(g) => g.get_status(payment_id).await,
        }
    }
}
