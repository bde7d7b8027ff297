//! crates/itinerary_core/src/ports.rs
//!
//! Defines the service contracts (traits) for every external collaborator of the
//! pipeline. These traits form the boundary of the hexagonal architecture, keeping
//! the core independent of the generation vendor, the database and the identity
//! provider.

use async_trait::async_trait;

use crate::domain::{PlaceSuggestion, TripPlan};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The remote side could not be reached (connection, DNS, TLS, reset).
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Timed out: {0}")]
    Timeout(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl PortError {
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Transport(_) | PortError::Timeout(_))
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The rendered instruction pair sent to the generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPrompt {
    pub system: String,
    pub user: String,
}

#[async_trait]
pub trait ItineraryGenerationService: Send + Sync {
    /// Sends the prompt and returns the raw text of the single completion.
    async fn generate(&self, prompt: &GenerationPrompt) -> PortResult<String>;
}

#[async_trait]
pub trait TripStore: Send + Sync {
    /// Inserts or replaces the trip keyed by its id. An existing trip is only
    /// replaced when it has the same owner.
    async fn upsert_trip(&self, trip: &TripPlan) -> PortResult<()>;

    async fn get_trip(&self, trip_id: &str) -> PortResult<TripPlan>;

    /// The user's trips, newest first.
    async fn list_trips_for_user(&self, user_id: &str, limit: usize) -> PortResult<Vec<TripPlan>>;

    /// Deletes a trip only if it belongs to `user_id`. Returns whether a trip was removed.
    async fn delete_trip(&self, trip_id: &str, user_id: &str) -> PortResult<bool>;
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Converts a bearer credential into a user id, or `None` if it is not accepted.
    async fn resolve_user(&self, bearer_token: &str) -> PortResult<Option<String>>;
}

#[async_trait]
pub trait PlacesService: Send + Sync {
    async fn autocomplete(&self, query: &str) -> PortResult<Vec<PlaceSuggestion>>;
}
