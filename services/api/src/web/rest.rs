//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::{ApiError, HttpError};
use crate::web::middleware::CurrentUser;
use crate::web::response::{
    ErrorBody, ErrorEnvelope, GenerateTripResponse, HealthResponse, HealthStatus,
    PlaceSuggestionsResponse, TripId, TripIdResponse, TripListResponse, TripResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use itinerary_core::{PlaceSuggestion, PlanAdvisory, PortError, TripFormInput, TripPlan};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, OpenApi};

/// Maximum number of trips returned by the listing endpoint.
pub const TRIP_LIST_LIMIT: usize = 50;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        generate_trip_handler,
        autocomplete_handler,
        health_handler,
        save_trip_handler,
        get_saved_trip_handler,
        list_trips_handler,
        delete_trip_handler,
    ),
    components(
        schemas(
            TripFormInput,
            TripPlan,
            PlanAdvisory,
            PlaceSuggestion,
            GenerateTripResponse,
            TripResponse,
            TripListResponse,
            TripId,
            TripIdResponse,
            PlaceSuggestionsResponse,
            HealthStatus,
            HealthResponse,
            ErrorBody,
            ErrorEnvelope,
        )
    ),
    tags(
        (name = "Itinerary Planner API", description = "Trip generation, storage and place lookup.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Request Payload Structs
//=========================================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AutocompleteQuery {
    /// Free-text place query; fewer than 2 characters yields no suggestions.
    pub query: Option<String>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Generate a day-by-day itinerary for a trip request.
///
/// The plan is stored before it is returned. Non-fatal observations about the
/// generated plan are listed under `advisories`.
#[utoipa::path(
    post,
    path = "/api/trips/generate",
    request_body = TripFormInput,
    responses(
        (status = 201, description = "Trip generated and stored", body = GenerateTripResponse),
        (status = 400, description = "Invalid trip request", body = ErrorEnvelope),
        (status = 401, description = "Caller could not be identified", body = ErrorEnvelope),
        (status = 502, description = "Generation failed or produced an unusable plan", body = ErrorEnvelope),
        (status = 504, description = "Generation timed out", body = ErrorEnvelope),
        (status = 500, description = "The trip could not be stored", body = ErrorEnvelope)
    )
)]
pub async fn generate_trip_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    payload: Result<Json<TripFormInput>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Json(input) = payload.map_err(|e| state.reject(ApiError::BadRequest(e.body_text())))?;

    let generated = state
        .pipeline
        .generate_trip(&input, &user_id)
        .await
        .map_err(|e| state.reject(e))?;

    Ok((
        StatusCode::CREATED,
        Json(GenerateTripResponse::new(
            generated.plan,
            generated.advisories,
        )),
    ))
}

/// Suggest cities matching a partial name.
#[utoipa::path(
    get,
    path = "/api/places/autocomplete",
    params(AutocompleteQuery),
    responses(
        (status = 200, description = "Matching places, best first", body = PlaceSuggestionsResponse),
        (status = 502, description = "The places service failed", body = ErrorEnvelope)
    )
)]
pub async fn autocomplete_handler(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AutocompleteQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Query(params) = params.map_err(|e| state.reject(ApiError::BadRequest(e.body_text())))?;
    let query = params.query.unwrap_or_default();

    let suggestions = state
        .places
        .autocomplete(&query)
        .await
        .map_err(|e| state.reject(ApiError::Places(e)))?;

    Ok(Json(PlaceSuggestionsResponse::new(suggestions)))
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "The service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Insert or replace one of the current user's trip plans, keyed by its id.
///
/// The stored trip is always owned by the caller; ids already owned by another
/// user are refused.
#[utoipa::path(
    post,
    path = "/api/db/trips",
    request_body = TripPlan,
    responses(
        (status = 201, description = "Trip stored", body = TripIdResponse),
        (status = 400, description = "Missing id or malformed plan", body = ErrorEnvelope),
        (status = 403, description = "The id belongs to another user's trip", body = ErrorEnvelope),
        (status = 500, description = "The trip could not be stored", body = ErrorEnvelope)
    )
)]
pub async fn save_trip_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    payload: Result<Json<TripPlan>, JsonRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let Json(mut trip) = payload.map_err(|e| state.reject(ApiError::BadRequest(e.body_text())))?;

    if trip.id.trim().is_empty() {
        return Err(state.reject(ApiError::BadRequest("id is required".to_string())));
    }
    trip.user_id = user_id;

    match state.store.get_trip(&trip.id).await {
        Ok(existing) if existing.user_id != trip.user_id => {
            return Err(state.reject(ApiError::Forbidden(
                "This trip belongs to another user".to_string(),
            )));
        }
        Ok(_) | Err(PortError::NotFound(_)) => {}
        Err(e) => return Err(state.reject(ApiError::Store(e))),
    }

    state
        .store
        .upsert_trip(&trip)
        .await
        .map_err(|e| state.reject(ApiError::Store(e)))?;
    info!("Trip {} saved for user {}", trip.id, trip.user_id);

    Ok((StatusCode::CREATED, Json(TripIdResponse::new(trip.id))))
}

/// Fetch a stored trip plan by id.
#[utoipa::path(
    get,
    path = "/api/db/trips/{trip_id}",
    params(("trip_id" = String, Path, description = "The trip id.")),
    responses(
        (status = 200, description = "The stored trip", body = TripResponse),
        (status = 404, description = "No trip with this id", body = ErrorEnvelope)
    )
)]
pub async fn get_saved_trip_handler(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let trip = state
        .store
        .get_trip(&trip_id)
        .await
        .map_err(|e| state.reject(ApiError::Store(e)))?;
    Ok(Json(TripResponse::new(trip)))
}

/// List the current user's trips, newest first.
#[utoipa::path(
    get,
    path = "/api/trips",
    responses(
        (status = 200, description = "The user's trips", body = TripListResponse),
        (status = 401, description = "Caller could not be identified", body = ErrorEnvelope)
    )
)]
pub async fn list_trips_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<impl IntoResponse, HttpError> {
    let trips = state
        .store
        .list_trips_for_user(&user_id, TRIP_LIST_LIMIT)
        .await
        .map_err(|e| state.reject(ApiError::Store(e)))?;
    Ok(Json(TripListResponse::new(trips)))
}

/// Delete one of the current user's trips.
#[utoipa::path(
    delete,
    path = "/api/trips/{trip_id}",
    params(("trip_id" = String, Path, description = "The trip id.")),
    responses(
        (status = 200, description = "Trip deleted", body = TripIdResponse),
        (status = 404, description = "No such trip owned by the caller", body = ErrorEnvelope)
    )
)]
pub async fn delete_trip_handler(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(trip_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = state
        .store
        .delete_trip(&trip_id, &user_id)
        .await
        .map_err(|e| state.reject(ApiError::Store(e)))?;

    if !deleted {
        return Err(state.reject(ApiError::NotFound("Trip not found".to_string())));
    }
    info!("Trip {} deleted by user {}", trip_id, user_id);
    Ok(Json(TripIdResponse::new(trip_id)))
}

/// Envelope for requests that match no route.
pub async fn not_found_handler(State(state): State<Arc<AppState>>) -> HttpError {
    state.reject(ApiError::NotFound("Route not found".to_string()))
}
