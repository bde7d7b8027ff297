pub mod middleware;
pub mod response;
pub mod rest;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub use middleware::{resolve_identity, CurrentUser};
pub use rest::{
    autocomplete_handler, delete_trip_handler, generate_trip_handler, get_saved_trip_handler,
    health_handler, list_trips_handler, not_found_handler, save_trip_handler,
};
pub use state::AppState;

/// Builds the complete HTTP router for the service.
pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no identity required)
    let public_routes = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/places/autocomplete", get(autocomplete_handler));

    // Trip routes resolve the caller first
    let trip_routes = Router::new()
        .route("/api/trips/generate", post(generate_trip_handler))
        .route("/api/trips", get(list_trips_handler))
        .route("/api/trips/{trip_id}", delete(delete_trip_handler))
        .route("/api/db/trips", post(save_trip_handler))
        .route("/api/db/trips/{trip_id}", get(get_saved_trip_handler))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            resolve_identity,
        ));

    Router::new()
        .merge(public_routes)
        .merge(trip_routes)
        .fallback(not_found_handler)
        .layer(cors_layer(&state.config.cors_allowed_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `*` allows any origin; otherwise a comma-separated list of exact origins.
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = if allowed_origin.trim() == "*" {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origin
                .split(',')
                .filter_map(|o| o.trim().parse::<HeaderValue>().ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}
