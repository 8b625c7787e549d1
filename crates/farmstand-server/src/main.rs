use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use farmstand_api::AppStateInner;
use farmstand_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farmstand=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let host = std::env::var("FARMSTAND_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("FARMSTAND_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database; each request opens its own session from here
    let db = Database::new(DbConfig::from_env())?;

    let app = farmstand_api::router(Arc::new(AppStateInner { db }))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Farmstand server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
