//! crates/itinerary_core/src/validation.rs
//!
//! Input validation for submitted trip forms. Runs before any external call and
//! reports only the first offending field.

use chrono::NaiveDate;

use crate::domain::{inclusive_day_count, TravelStyle, TripFormInput, TripRequest};
use crate::error::ValidationError;

pub const MIN_PLACE_CHARS: usize = 2;
pub const MAX_PLACE_CHARS: usize = 200;
pub const MIN_BUDGET: f64 = 100.0;
pub const MAX_BUDGET: f64 = 10_000_000.0;
pub const MAX_TRAVELERS: i64 = 20;
pub const MAX_TRIP_DAYS: u32 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates a raw trip form into an immutable [`TripRequest`].
///
/// Rules are checked in a fixed order and the first failure wins:
/// origin, destination, start date, end date, date order, budget, travelers,
/// travel style. Upper bounds (place length, budget, party size, trip length)
/// are checked afterwards.
pub fn validate_trip_request(input: &TripFormInput) -> Result<TripRequest, ValidationError> {
    let origin = required_place("origin", input.origin.as_deref())?;
    let destination = required_place("destination", input.destination.as_deref())?;
    let start_date = required_date("startDate", input.start_date.as_deref())?;
    let end_date = required_date("endDate", input.end_date.as_deref())?;

    if end_date < start_date {
        return Err(ValidationError::new(
            "endDate",
            "endDate must be on or after startDate",
        ));
    }

    let budget = match input.budget {
        Some(b) if b.is_finite() && b >= MIN_BUDGET => b,
        _ => {
            return Err(ValidationError::new(
                "budget",
                format!("budget must be at least {}", MIN_BUDGET),
            ))
        }
    };

    let travelers = match input.number_of_travelers {
        Some(n) if n >= 1 => n,
        _ => {
            return Err(ValidationError::new(
                "numberOfTravelers",
                "numberOfTravelers must be at least 1",
            ))
        }
    };

    let travel_style = input
        .travel_style
        .as_deref()
        .ok_or_else(|| ValidationError::new("travelStyle", "travelStyle is required"))?
        .parse::<TravelStyle>()
        .map_err(|e| ValidationError::new("travelStyle", e))?;

    // --- Upper bounds ---
    for (field, value) in [("origin", &origin), ("destination", &destination)] {
        if value.chars().count() > MAX_PLACE_CHARS {
            return Err(ValidationError::new(
                field,
                format!("{} must be at most {} characters", field, MAX_PLACE_CHARS),
            ));
        }
    }
    if budget > MAX_BUDGET {
        return Err(ValidationError::new(
            "budget",
            format!("budget must not exceed {}", MAX_BUDGET),
        ));
    }
    if travelers > MAX_TRAVELERS {
        return Err(ValidationError::new(
            "numberOfTravelers",
            format!("numberOfTravelers must not exceed {}", MAX_TRAVELERS),
        ));
    }
    if inclusive_day_count(start_date, end_date) > MAX_TRIP_DAYS {
        return Err(ValidationError::new(
            "endDate",
            format!("trip cannot be longer than {} days", MAX_TRIP_DAYS),
        ));
    }

    Ok(TripRequest {
        origin,
        origin_place_id: non_empty(input.origin_place_id.as_deref()),
        destination,
        destination_place_id: non_empty(input.destination_place_id.as_deref()),
        start_date,
        end_date,
        budget,
        travel_style,
        // Bounded by MAX_TRAVELERS above.
        number_of_travelers: travelers as u32,
    })
}

fn required_place(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value.map(str::trim) {
        Some(v) if v.chars().count() >= MIN_PLACE_CHARS => Ok(v.to_string()),
        _ => Err(ValidationError::new(
            field,
            format!(
                "{} is required and must be at least {} characters",
                field, MIN_PLACE_CHARS
            ),
        )),
    }
}

fn required_date(field: &'static str, value: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::new(field, format!("{} is required", field)))?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        ValidationError::new(
            field,
            format!("{} must be a calendar date in YYYY-MM-DD form", field),
        )
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
