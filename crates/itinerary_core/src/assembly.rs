//! crates/itinerary_core/src/assembly.rs
//!
//! Turns a validated, enriched draft into the final `TripPlan`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ItineraryDraft, TripPlan, TripRequest};

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_SEGMENTS: [usize; 3] = [8, 4, 4];

/// A fresh trip id: three dash-joined lowercase alphanumeric segments (8-4-4).
///
/// Ids are random, not checked against the store; a collision is an accepted risk.
pub fn generate_trip_id() -> String {
    let entropy = Uuid::new_v4();
    let mut chars = entropy
        .as_bytes()
        .iter()
        .map(|b| ID_ALPHABET[usize::from(*b) % ID_ALPHABET.len()] as char);

    ID_SEGMENTS
        .iter()
        .map(|len| chars.by_ref().take(*len).collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// Attaches identity and request fields to a validated draft.
pub fn assemble_trip(
    request: &TripRequest,
    draft: ItineraryDraft,
    trip_id: String,
    user_id: String,
    created_at: DateTime<Utc>,
) -> TripPlan {
    TripPlan {
        id: trip_id,
        user_id,
        origin: request.origin.clone(),
        destination: request.destination.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        total_days: request.total_days(),
        travel_style: request.travel_style,
        number_of_travelers: request.number_of_travelers,
        estimated_total_budget: draft.estimated_total_budget,
        itinerary: draft.itinerary,
        budget_breakdown: draft.budget_breakdown,
        route_optimization: draft.route_optimization,
        created_at,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_ids_have_three_lowercase_alphanumeric_segments() {
        for _ in 0..50 {
            let id = generate_trip_id();
            let segments: Vec<&str> = id.split('-').collect();
            assert_eq!(
                segments.iter().map(|s| s.len()).collect::<Vec<_>>(),
                vec![8, 4, 4],
                "{}",
                id
            );
            assert!(id
                .chars()
                .all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn trip_ids_vary_between_calls() {
        assert_ne!(generate_trip_id(), generate_trip_id());
    }
}
