use dotenvy::dotenv;
use macro_buddy::{
    ai::{NutritionEstimator, OpenAiVisionClient},
    api::{self, AppState},
    config::{
        database,
        seed::{self, DEFAULT_SEED_PATH},
        settings::AppConfig,
    },
    core::user,
    errors::Result,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Server, database, and AI provider settings
    let app_config = AppConfig::from_env()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect and create tables
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Connected to {}", app_config.database_url))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|()| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed houses and users from config.toml, if present
    match seed::load_optional_seed_config(DEFAULT_SEED_PATH)
        .inspect_err(|e| error!("Failed to read {}: {}", DEFAULT_SEED_PATH, e))?
    {
        Some(seed_config) => {
            user::seed_from_config(&db, &seed_config)
                .await
                .inspect_err(|e| error!("Failed to seed users: {}", e))?;
        }
        None => warn!("No {} found; no users will be seeded.", DEFAULT_SEED_PATH),
    }

    // 6. Serve
    let estimator = NutritionEstimator::new(Arc::new(OpenAiVisionClient::new(app_config.ai)));
    let state = AppState {
        db,
        estimator: Arc::new(estimator),
    };
    let app = api::router(state, app_config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(app_config.bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", app_config.bind_address, e))?;
    info!("Listening on http://{}", app_config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received.");
}
