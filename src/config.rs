#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub use_simulator: bool,
    pub network_secret_key: Option<String>,
    pub network_base_url: String,
    pub network_timeout_ms: u64,
    pub simulator_charge_latency_ms: u64,
    pub simulator_status_latency_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            use_simulator: parse_bool(std::env::var("PAYMENT_USE_SIMULATOR").ok(), true),
            network_secret_key: std::env::var("STRIPE_SECRET_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            network_base_url: std::env::var("PAYMENT_NETWORK_BASE_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
            network_timeout_ms: parse_u64(std::env::var("PAYMENT_NETWORK_TIMEOUT_MS").ok(), 10_000),
            simulator_charge_latency_ms: parse_u64(
                std::env::var("SIMULATOR_CHARGE_LATENCY_MS").ok(),
                500,
            ),
            simulator_status_latency_ms: parse_u64(
                std::env::var("SIMULATOR_STATUS_LATENCY_MS").ok(),
                100,
            ),
        }
    }
}

// Masks the secret key.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("use_simulator", &self.use_simulator)
            .field("network_secret_key", &self.network_secret_key.as_ref().map(|_| "***"))
            .field("network_base_url", &self.network_base_url)
            .field("network_timeout_ms", &self.network_timeout_ms)
            .field("simulator_charge_latency_ms", &self.simulator_charge_latency_ms)
            .field("simulator_status_latency_ms", &self.simulator_status_latency_ms)
            .finish()
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(|s| s.trim().to_ascii_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

fn parse_u64(value: Option<String>, default: u64) -> u64 {
    value.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(default)
}
