//! crates/itinerary_core/src/domain.rs
//!
//! Defines the core data structures of the itinerary planner.
//! The serde shapes here are the wire shapes: field names and nesting match the
//! JSON the generator is instructed to produce and the JSON returned to callers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Enumerations
//=========================================================================================

/// The fixed set of travel styles a trip can be planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Luxury,
    Backpacking,
    Family,
    Romantic,
    Adventure,
    Spiritual,
}

impl TravelStyle {
    pub const ALL: [TravelStyle; 6] = [
        TravelStyle::Luxury,
        TravelStyle::Backpacking,
        TravelStyle::Family,
        TravelStyle::Romantic,
        TravelStyle::Adventure,
        TravelStyle::Spiritual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelStyle::Luxury => "luxury",
            TravelStyle::Backpacking => "backpacking",
            TravelStyle::Family => "family",
            TravelStyle::Romantic => "romantic",
            TravelStyle::Adventure => "adventure",
            TravelStyle::Spiritual => "spiritual",
        }
    }
}

impl fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("'{}' is not a supported travel style", s))
    }
}

/// What kind of stop a time slot is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    Attraction,
    Restaurant,
    Transport,
    Hotel,
    Activity,
}

//=========================================================================================
// Trip Request (user intent)
//=========================================================================================

/// The raw trip form as submitted by a client. Every field is optional so the
/// input validator, not the deserializer, decides which field is at fault.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TripFormInput {
    pub origin: Option<String>,
    pub origin_place_id: Option<String>,
    pub destination: Option<String>,
    pub destination_place_id: Option<String>,
    /// Inclusive start date, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive end date, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    pub budget: Option<f64>,
    pub travel_style: Option<String>,
    pub number_of_travelers: Option<i64>,
}

/// A validated, immutable trip request.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub origin: String,
    pub origin_place_id: Option<String>,
    pub destination: String,
    pub destination_place_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub travel_style: TravelStyle,
    pub number_of_travelers: u32,
}

impl TripRequest {
    /// Inclusive number of calendar days between the start and end date.
    pub fn total_days(&self) -> u32 {
        inclusive_day_count(self.start_date, self.end_date)
    }

    /// The calendar date of the given 1-based day number.
    pub fn date_of_day(&self, day_number: u32) -> Option<NaiveDate> {
        let offset = day_number.checked_sub(1)?;
        self.start_date
            .checked_add_days(chrono::Days::new(u64::from(offset)))
    }
}

/// Inclusive day count; an inverted range counts as zero days.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days() + 1;
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

//=========================================================================================
// Plan Structures
//=========================================================================================

/// One scheduled stop within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// Time-of-day label, e.g. "09:00 AM".
    pub time: String,
    pub place_name: String,
    pub description: String,
    pub estimated_duration: String,
    pub estimated_cost: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Filled in by geo enrichment.
    pub google_maps_link: String,
    pub travel_time_from_previous: String,
    pub category: SlotCategory,
}

/// One calendar day of a trip. Slot order is visit order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DayItinerary {
    pub day_number: u32,
    pub date: NaiveDate,
    pub theme: String,
    pub time_slots: Vec<TimeSlot>,
    pub daily_cost_estimate: f64,
}

/// Aggregate cost by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub flights: f64,
    pub accommodation: f64,
    pub food: f64,
    pub local_transport: f64,
    pub entry_tickets: f64,
    pub miscellaneous: f64,
    pub total: f64,
}

impl BudgetBreakdown {
    /// Sum of the six category fields.
    pub fn parts_sum(&self) -> f64 {
        self.flights
            + self.accommodation
            + self.food
            + self.local_transport
            + self.entry_tickets
            + self.miscellaneous
    }
}

/// Explanatory route rationale, requested from and trusted from the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RouteOptimization {
    pub clustering_strategy: String,
    pub distance_matrix_usage: String,
    pub visit_order_optimization: String,
    pub total_optimized_distance: String,
}

impl RouteOptimization {
    pub fn has_empty_field(&self) -> bool {
        [
            &self.clustering_strategy,
            &self.distance_matrix_usage,
            &self.visit_order_optimization,
            &self.total_optimized_distance,
        ]
        .iter()
        .any(|s| s.trim().is_empty())
    }
}

/// The validated generator output, before an id and owner are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryDraft {
    pub estimated_total_budget: f64,
    pub itinerary: Vec<DayItinerary>,
    pub budget_breakdown: BudgetBreakdown,
    pub route_optimization: RouteOptimization,
}

/// The finalized, persisted itinerary artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub id: String,
    pub user_id: String,
    pub origin: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: u32,
    pub travel_style: TravelStyle,
    pub number_of_travelers: u32,
    pub estimated_total_budget: f64,
    pub itinerary: Vec<DayItinerary>,
    pub budget_breakdown: BudgetBreakdown,
    pub route_optimization: RouteOptimization,
    pub created_at: DateTime<Utc>,
    /// Store-level metadata, set by the trip store on upsert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

//=========================================================================================
// Places
//=========================================================================================

/// A single place autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
    pub main_text: String,
    pub secondary_text: String,
}
