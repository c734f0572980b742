use payment_service::config::AppConfig;
use payment_service::gateways::{ConfiguredGateway, PaymentGateway};
use payment_service::http::routes::router;
use payment_service::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();
    let gateway = ConfiguredGateway::from_config(&cfg)?;
    tracing::info!(gateway = gateway.name(), "payment gateway selected");

    let app = router(AppState::new(gateway));

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;
    Ok(())
}
