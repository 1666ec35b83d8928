use tasktime::{config::ServerConfig, http::{routing, state::AppState}, infrastructure::sqlite_repo::SqliteStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env()?;
    let store = SqliteStore::connect(&config.database_url).await?;
    store.init().await?;
    let router = routing::app(AppState::from_store(store, config.summary_scope));

    let addr = config.bind_addr()?;
    tracing::info!(%addr, scope = ?config.summary_scope, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
