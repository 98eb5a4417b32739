//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod calculator;
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

use crate::config::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = Config::from_env()?;
    let app_state = AppState::new(&config).await?;

    let app = routes::build_router(app_state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        "🚀 Servidor escutando em {} (fuso das reservas: {})",
        listener.local_addr()?,
        config.booking_tz
    );
    axum::serve(listener, app).await?;

    Ok(())
}
