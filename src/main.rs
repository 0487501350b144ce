mod config;
mod routes;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");
    let port = config.port;
    tracing::info!(
        environment = %config.portal.environment,
        identity_url = %config.portal.identity_base_url,
        gate_debounce = config.portal.gate_debounce_cycles,
        "portal configuration loaded"
    );
    if config.portal.environment.allows_mock_accounts() {
        tracing::warn!("mock accounts and bypass parameters are enabled; do not expose this instance publicly");
    }

    let app = routes::app(&config).expect("failed to build router");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "hrportal listening");
    axum::serve(listener, app).await.expect("server failed");
}
