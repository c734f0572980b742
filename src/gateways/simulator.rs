use crate::domain::outcome::PaymentOutcome;
use crate::gateways::{ChargeRequest, PaymentGateway};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Approves every charge and keeps each outcome for later lookups.
#[derive(Default, Clone)]
pub struct SimulatorGateway {
    payments: Arc<RwLock<HashMap<String, PaymentOutcome>>>,
    charge_latency: Duration,
    status_latency: Duration,
}

impl SimulatorGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(charge_latency: Duration, status_latency: Duration) -> Self {
        Self {
            charge_latency,
            status_latency,
            ..Self::default()
        }
    }

    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait::async_trait]
impl PaymentGateway for SimulatorGateway {
    fn name(&self) -> &'static str {
        "simulator"
    }

    async fn charge(&self, request: ChargeRequest) -> PaymentOutcome {
        simulate_latency(self.charge_latency).await;

        let payment_id = uuid::Uuid::new_v4().to_string();
        let transaction_id = format!("sim_txn_{}", uuid::Uuid::new_v4().simple());
        let outcome =
            PaymentOutcome::succeeded(payment_id.clone(), transaction_id, request.amount, &request.currency);

        self.payments.write().await.insert(payment_id, outcome.clone());

        tracing::info!(
            gateway = "simulator",
            order_id = %request.order_id,
            payment_id = %outcome.payment_id,
            "simulated charge succeeded"
        );
        outcome
    }

    async fn get_status(&self, payment_id: &str) -> PaymentOutcome {
        simulate_latency(self.status_latency).await;

        match self.payments.read().await.get(payment_id) {
            Some(outcome) => outcome.clone(),
            None => PaymentOutcome::not_found(payment_id),
        }
    }
}
