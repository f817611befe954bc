/// BookVault API server entry point

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookvault_api::app::{build_router, AppState};
use bookvault_api::config::Config;
use bookvault_shared::auth::bootstrap::ensure_root_admin;
use bookvault_shared::db::migrations::run_migrations;
use bookvault_shared::db::pool::{create_pool, DatabaseConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookvault_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting BookVault API server v{}", bookvault_shared::VERSION);

    let config = Config::from_env()?;

    let db = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&db).await?;

    // Seed the reserved root admin; idempotent across restarts and replicas
    ensure_root_admin(&db, &config.root_admin.username, &config.root_admin.seed_password).await?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(db, config));

    tracing::info!("Listening on {}", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
