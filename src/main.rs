use anyhow::Context;
use barflow::router::init_router;
use barflow::state::init_app_state;
use barflow_config::ServerConfig;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    barflow_observability::init_tracing();

    let state = init_app_state().context("Failed to initialize application state")?;
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(address = %address, "Server running");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
