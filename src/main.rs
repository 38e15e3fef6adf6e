use std::sync::Arc;

use classroom_api::config::config;
use classroom_api::store::pg::PgStore;
use classroom_api::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classroom_api=info,tower_http=info".into()),
        )
        .init();

    let cfg = config();
    tracing::info!("Starting Classroom API in {:?} mode", cfg.environment);

    let store = PgStore::connect().await?;
    let state = AppState::new(Arc::new(store));
    let app = router(state);

    let bind_addr = format!("0.0.0.0:{}", cfg.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Classroom API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
