//! services/api/src/web/response.rs
//!
//! The JSON envelopes every endpoint answers with. Success bodies are
//! `{ success: true, data }`; failures are `{ success: false, error }`.

use itinerary_core::{PlaceSuggestion, PlanAdvisory, TripPlan};
use serde::Serialize;
use utoipa::ToSchema;

//=========================================================================================
// Failure Envelope
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Stable machine-readable code, e.g. `VALIDATION_ERROR`.
    pub code: String,
    pub message: String,
    /// Internal error text, only present in development mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    pub fn new(code: &str, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        }
    }
}

//=========================================================================================
// Success Envelopes
//=========================================================================================

/// A freshly generated trip, with the advisories raised while validating it.
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateTripResponse {
    pub success: bool,
    pub data: TripPlan,
    pub advisories: Vec<PlanAdvisory>,
}

impl GenerateTripResponse {
    pub fn new(data: TripPlan, advisories: Vec<PlanAdvisory>) -> Self {
        Self {
            success: true,
            data,
            advisories,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripResponse {
    pub success: bool,
    pub data: TripPlan,
}

impl TripResponse {
    pub fn new(data: TripPlan) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripListResponse {
    pub success: bool,
    pub data: Vec<TripPlan>,
}

impl TripListResponse {
    pub fn new(data: Vec<TripPlan>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripId {
    pub id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TripIdResponse {
    pub success: bool,
    pub data: TripId,
}

impl TripIdResponse {
    pub fn new(id: String) -> Self {
        Self {
            success: true,
            data: TripId { id },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceSuggestionsResponse {
    pub success: bool,
    pub data: Vec<PlaceSuggestion>,
}

impl PlaceSuggestionsResponse {
    pub fn new(data: Vec<PlaceSuggestion>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub data: HealthStatus,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            data: HealthStatus {
                status: "ok".to_string(),
            },
        }
    }
}
