mod app;
mod config;
mod db;
mod entities;
mod error;
mod models;
mod routes;
mod store;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,mymovie=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = if config.auto_migrate {
        db::connect_and_migrate(&config.database_url, config.db_max_connections).await?
    } else {
        tracing::info!("AUTO_MIGRATE disabled, expecting schema to exist");
        db::connect(&config.database_url, config.db_max_connections).await?
    };

    let app = app::create_app(Arc::new(AppState { db }));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
