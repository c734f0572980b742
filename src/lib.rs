use gateways::ConfiguredGateway;
use std::sync::Arc;

pub mod config;
pub mod domain {
    pub mod money;
    pub mod outcome;
    pub mod payment;
}
pub mod gateways;
pub mod http {
    pub mod handlers {
        pub mod payments;
    }
    pub mod routes;
}

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ConfiguredGateway>,
}

impl AppState {
    pub fn new(gateway: ConfiguredGateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }
}
