//! crates/itinerary_core/src/lib.rs
//!
//! Domain model and generation pipeline for the itinerary planner.

pub mod assembly;
pub mod domain;
pub mod error;
pub mod geo;
pub mod pipeline;
pub mod plan_validator;
pub mod ports;
pub mod prompt;
pub mod validation;

pub use domain::{
    BudgetBreakdown, DayItinerary, ItineraryDraft, PlaceSuggestion, RouteOptimization,
    SlotCategory, TimeSlot, TravelStyle, TripFormInput, TripPlan, TripRequest,
};
pub use error::{PipelineError, ValidationError};
pub use pipeline::{GeneratedTrip, PipelineOptions, TripPipeline};
pub use plan_validator::{PlanAdvisory, PlanValidator, ValidatedPlan};
pub use ports::{
    GenerationPrompt, IdentityProvider, ItineraryGenerationService, PlacesService, PortError,
    PortResult, TripStore,
};
