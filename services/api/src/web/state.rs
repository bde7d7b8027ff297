//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::error::{ApiError, HttpError};
use itinerary_core::ports::{IdentityProvider, PlacesService, TripStore};
use itinerary_core::TripPipeline;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TripPipeline>,
    pub store: Arc<dyn TripStore>,
    pub places: Arc<dyn PlacesService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wraps an error for the response, exposing details only in development.
    pub fn reject(&self, error: impl Into<ApiError>) -> HttpError {
        HttpError {
            error: error.into(),
            expose_details: self.config.is_development(),
        }
    }
}
