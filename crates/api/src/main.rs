use std::sync::Arc;

use infra::memory::MemoryStore;
use infra::repos::PgStore;
use infra::DynStore;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::app::build_router;
use api::gql::build_schema;
use api::{AppConfig, AppState, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    let store: DynStore = match config.store_backend {
        StoreBackend::Postgres => {
            let db_config = config.db_config()?;
            let pool = infra::db::connect(&db_config).await?;
            tracing::info!(
                "Connected to Postgres with max {} connections",
                db_config.max_connections
            );

            // Tables are derived from the declarations in `infra::schema`
            if config.skip_auto_migrate {
                tracing::info!("Skipping schema sync (SKIP_AUTO_MIGRATE=true)");
            } else {
                tracing::info!("Syncing database schema...");
                infra::schema::auto_migrate(&pool).await?;
                tracing::info!("Database schema is up to date");
            }

            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let port = config.port;
    let state = AppState::new(store, config);

    // Any composition error aborts startup before the listener is bound
    let schema = build_schema(&state)?;

    let app = build_router(state, schema);

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
