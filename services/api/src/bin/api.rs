//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        generation_llm::openai_client, AnonymousIdentityAdapter, GooglePlacesAdapter,
        InMemoryTripStore, OpenAiItineraryAdapter, PgTripStore,
    },
    config::Config,
    error::ApiError,
    web::{rest::ApiDoc, router, AppState},
};
use itinerary_core::{PipelineOptions, TripPipeline, TripStore};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!(
        "Configuration loaded ({} environment). Starting server...",
        config.environment
    );

    // --- 2. Choose the Trip Store ---
    // The pool is created once here and lives for the whole process.
    let store: Arc<dyn TripStore> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            let pg_store = PgTripStore::new(db_pool);
            info!("Running database migrations...");
            pg_store.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(pg_store)
        }
        None => {
            warn!("DATABASE_URL is not set; trips are kept in memory and lost on restart");
            Arc::new(InMemoryTripStore::new())
        }
    };

    // --- 3. Initialize Service Adapters ---
    let api_key = config
        .openai_api_key
        .as_deref()
        .ok_or_else(|| ApiError::Internal("OPENAI_API_KEY is required".to_string()))?;
    let llm_client = openai_client(api_key, config.openai_base_url.as_deref());

    let generator = Arc::new(OpenAiItineraryAdapter::new(
        llm_client,
        config.generation_model.clone(),
        config.generation_temperature,
        config.generation_max_tokens,
        config.generation_timeout,
    ));

    if config.google_maps_api_key.is_none() {
        warn!("GOOGLE_MAPS_API_KEY is not set; place autocomplete returns no suggestions");
    }
    let places = Arc::new(GooglePlacesAdapter::new(config.google_maps_api_key.clone()));

    if config.allow_anonymous {
        warn!(
            "Anonymous access is enabled; unidentified callers act as '{}'",
            config.anonymous_user_id
        );
    }
    let identity = Arc::new(AnonymousIdentityAdapter::new());

    // --- 4. Build the Pipeline & Shared AppState ---
    let pipeline = Arc::new(TripPipeline::new(
        generator,
        store.clone(),
        PipelineOptions {
            currency: config.currency.clone(),
            budget_tolerance: config.budget_tolerance,
            transport_retries: config.generation_transport_retries,
            ..PipelineOptions::default()
        },
    ));

    let app_state = Arc::new(AppState {
        pipeline,
        store,
        places,
        identity,
        config: config.clone(),
    });

    // --- 5. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
