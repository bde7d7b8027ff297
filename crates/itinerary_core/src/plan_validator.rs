//! crates/itinerary_core/src/plan_validator.rs
//!
//! The trust boundary between the generation service and the rest of the system.
//!
//! Raw generator text is parsed and checked against the plan shape. The only
//! repairs ever applied are:
//! - stripping one wrapping code fence,
//! - recomputing derivable sums (daily cost, budget total, a missing total estimate),
//! - defaulting missing descriptive strings to empty.
//!
//! Everything else that is missing or structurally wrong is a hard failure. Soft
//! expectations (budget close to the request, 4-6 slots a day, a filled-in route
//! narrative) never fail a plan; they are reported as [`PlanAdvisory`] entries.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    BudgetBreakdown, DayItinerary, ItineraryDraft, RouteOptimization, SlotCategory, TimeSlot,
    TripRequest,
};
use crate::error::PipelineError;

pub const DEFAULT_BUDGET_TOLERANCE: f64 = 0.25;
pub const DEFAULT_COST_TOLERANCE: f64 = 1.0;
pub const MIN_SLOTS_PER_DAY: usize = 4;
pub const MAX_SLOTS_PER_DAY: usize = 6;

const FENCE: &str = "```";

//=========================================================================================
// Advisories
//=========================================================================================

/// A non-fatal observation about an otherwise valid plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlanAdvisory {
    /// The plan's estimated total is outside the tolerance band around the requested budget.
    #[serde(rename_all = "camelCase")]
    BudgetOutsideTolerance {
        requested: f64,
        estimated: f64,
        tolerance: f64,
    },
    /// The stated budget total did not match its parts and was replaced by their sum.
    #[serde(rename_all = "camelCase")]
    BudgetTotalRecomputed { stated: Option<f64>, recomputed: f64 },
    /// A day's cost estimate did not match its slots and was replaced by their sum.
    #[serde(rename_all = "camelCase")]
    DailyCostRecomputed {
        day_number: u32,
        stated: Option<f64>,
        recomputed: f64,
    },
    /// No overall estimate was given; the budget breakdown total is used instead.
    #[serde(rename_all = "camelCase")]
    EstimatedBudgetDerived { value: f64 },
    #[serde(rename_all = "camelCase")]
    SlotCountOutOfRange { day_number: u32, count: usize },
    EmptyRouteNarrative,
}

impl PlanAdvisory {
    pub fn message(&self) -> String {
        match self {
            PlanAdvisory::BudgetOutsideTolerance {
                requested,
                estimated,
                tolerance,
            } => format!(
                "estimated total {} is more than {:.0}% away from the requested budget {}",
                estimated,
                tolerance * 100.0,
                requested
            ),
            PlanAdvisory::BudgetTotalRecomputed { stated, recomputed } => format!(
                "budget total {:?} replaced by the sum of its parts {}",
                stated, recomputed
            ),
            PlanAdvisory::DailyCostRecomputed {
                day_number,
                stated,
                recomputed,
            } => format!(
                "day {} cost estimate {:?} replaced by its slot sum {}",
                day_number, stated, recomputed
            ),
            PlanAdvisory::EstimatedBudgetDerived { value } => {
                format!("estimated total budget derived from the breakdown: {}", value)
            }
            PlanAdvisory::SlotCountOutOfRange { day_number, count } => format!(
                "day {} has {} time slots, expected {}-{}",
                day_number, count, MIN_SLOTS_PER_DAY, MAX_SLOTS_PER_DAY
            ),
            PlanAdvisory::EmptyRouteNarrative => {
                "route optimization summary has empty fields".to_string()
            }
        }
    }
}

/// A structurally valid, repaired plan plus everything worth flagging about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPlan {
    pub draft: ItineraryDraft,
    pub advisories: Vec<PlanAdvisory>,
}

//=========================================================================================
// Raw Generator Shapes
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlan {
    #[serde(default)]
    estimated_total_budget: Option<f64>,
    itinerary: Vec<RawDay>,
    budget_breakdown: RawBudget,
    route_optimization: RawRoute,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDay {
    day_number: u32,
    date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    theme: String,
    time_slots: Vec<RawSlot>,
    #[serde(default)]
    daily_cost_estimate: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlot {
    time: String,
    place_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    estimated_duration: String,
    estimated_cost: f64,
    latitude: f64,
    longitude: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    google_maps_link: String,
    #[serde(default, deserialize_with = "lenient_text")]
    travel_time_from_previous: String,
    category: SlotCategory,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBudget {
    flights: f64,
    accommodation: f64,
    food: f64,
    local_transport: f64,
    entry_tickets: f64,
    miscellaneous: f64,
    #[serde(default)]
    total: Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute {
    #[serde(default, deserialize_with = "lenient_text")]
    clustering_strategy: String,
    #[serde(default, deserialize_with = "lenient_text")]
    distance_matrix_usage: String,
    #[serde(default, deserialize_with = "lenient_text")]
    visit_order_optimization: String,
    #[serde(default, deserialize_with = "lenient_text")]
    total_optimized_distance: String,
}

/// Descriptive strings may be missing or `null`; both become empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

//=========================================================================================
// Validator
//=========================================================================================

#[derive(Debug, Clone)]
pub struct PlanValidator {
    budget_tolerance: f64,
    cost_tolerance: f64,
}

impl Default for PlanValidator {
    fn default() -> Self {
        Self {
            budget_tolerance: DEFAULT_BUDGET_TOLERANCE,
            cost_tolerance: DEFAULT_COST_TOLERANCE,
        }
    }
}

impl PlanValidator {
    /// `budget_tolerance` is the advisory band around the requested budget, as a fraction.
    pub fn new(budget_tolerance: f64) -> Self {
        Self {
            budget_tolerance,
            ..Self::default()
        }
    }

    /// Parses raw generator text and validates it for `request`.
    pub fn validate_text(
        &self,
        raw: &str,
        request: &TripRequest,
    ) -> Result<ValidatedPlan, PipelineError> {
        let body = strip_code_fence(raw);
        let value: Value = serde_json::from_str(body)
            .map_err(|e| PipelineError::malformed(raw, e.to_string()))?;
        self.validate_value(value, request)
    }

    /// Validates an already-parsed JSON document for `request`.
    pub fn validate_value(
        &self,
        value: Value,
        request: &TripRequest,
    ) -> Result<ValidatedPlan, PipelineError> {
        let raw: RawPlan = serde_path_to_error::deserialize(value).map_err(|e| {
            let path = e.path().to_string();
            PipelineError::schema(path, e.into_inner().to_string())
        })?;

        let mut advisories = Vec::new();
        let itinerary = self.check_itinerary(raw.itinerary, request, &mut advisories)?;
        let budget_breakdown = self.check_budget(raw.budget_breakdown, &mut advisories)?;

        let estimated_total_budget = match raw.estimated_total_budget {
            Some(v) if v.is_finite() && v >= 0.0 => v,
            Some(v) => {
                return Err(PipelineError::schema(
                    "estimatedTotalBudget",
                    format!("must be a non-negative amount, found {}", v),
                ))
            }
            None => {
                advisories.push(PlanAdvisory::EstimatedBudgetDerived {
                    value: budget_breakdown.total,
                });
                budget_breakdown.total
            }
        };

        if (estimated_total_budget - request.budget).abs() > request.budget * self.budget_tolerance
        {
            advisories.push(PlanAdvisory::BudgetOutsideTolerance {
                requested: request.budget,
                estimated: estimated_total_budget,
                tolerance: self.budget_tolerance,
            });
        }

        let route_optimization = RouteOptimization {
            clustering_strategy: raw.route_optimization.clustering_strategy,
            distance_matrix_usage: raw.route_optimization.distance_matrix_usage,
            visit_order_optimization: raw.route_optimization.visit_order_optimization,
            total_optimized_distance: raw.route_optimization.total_optimized_distance,
        };
        if route_optimization.has_empty_field() {
            advisories.push(PlanAdvisory::EmptyRouteNarrative);
        }

        for advisory in &advisories {
            warn!("Plan advisory: {}", advisory.message());
        }
        debug!(
            "Plan validated: {} days, {} advisories",
            itinerary.len(),
            advisories.len()
        );

        Ok(ValidatedPlan {
            draft: ItineraryDraft {
                estimated_total_budget,
                itinerary,
                budget_breakdown,
                route_optimization,
            },
            advisories,
        })
    }

    fn check_itinerary(
        &self,
        days: Vec<RawDay>,
        request: &TripRequest,
        advisories: &mut Vec<PlanAdvisory>,
    ) -> Result<Vec<DayItinerary>, PipelineError> {
        let total_days = request.total_days();
        if days.is_empty() {
            return Err(PipelineError::schema(
                "itinerary",
                "must contain at least one day",
            ));
        }
        if days.len() != total_days as usize {
            return Err(PipelineError::schema(
                "itinerary",
                format!("expected {} days, found {}", total_days, days.len()),
            ));
        }

        let mut itinerary = Vec::with_capacity(days.len());
        for (index, day) in days.into_iter().enumerate() {
            let path = format!("itinerary[{}]", index);
            let expected_number = index as u32 + 1;
            if day.day_number != expected_number {
                return Err(PipelineError::schema(
                    format!("{}.dayNumber", path),
                    format!("expected {}, found {}", expected_number, day.day_number),
                ));
            }

            let date = NaiveDate::parse_from_str(day.date.trim(), "%Y-%m-%d").map_err(|_| {
                PipelineError::schema(
                    format!("{}.date", path),
                    format!("'{}' is not a YYYY-MM-DD date", day.date),
                )
            })?;
            if date < request.start_date || date > request.end_date {
                return Err(PipelineError::schema(
                    format!("{}.date", path),
                    format!(
                        "{} is outside the trip range {}..{}",
                        date, request.start_date, request.end_date
                    ),
                ));
            }
            if request.date_of_day(expected_number) != Some(date) {
                return Err(PipelineError::schema(
                    format!("{}.date", path),
                    format!("{} does not fall on day {} of the trip", date, expected_number),
                ));
            }

            if day.time_slots.is_empty() {
                return Err(PipelineError::schema(
                    format!("{}.timeSlots", path),
                    "must contain at least one time slot",
                ));
            }
            let count = day.time_slots.len();
            if !(MIN_SLOTS_PER_DAY..=MAX_SLOTS_PER_DAY).contains(&count) {
                advisories.push(PlanAdvisory::SlotCountOutOfRange {
                    day_number: expected_number,
                    count,
                });
            }

            let time_slots = day
                .time_slots
                .into_iter()
                .enumerate()
                .map(|(slot_index, slot)| {
                    check_slot(slot, &format!("{}.timeSlots[{}]", path, slot_index))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let slot_sum: f64 = time_slots.iter().map(|s| s.estimated_cost).sum();
            let daily_cost_estimate = match day.daily_cost_estimate {
                Some(stated) if (stated - slot_sum).abs() <= self.cost_tolerance => stated,
                stated => {
                    advisories.push(PlanAdvisory::DailyCostRecomputed {
                        day_number: expected_number,
                        stated,
                        recomputed: slot_sum,
                    });
                    slot_sum
                }
            };

            itinerary.push(DayItinerary {
                day_number: expected_number,
                date,
                theme: day.theme,
                time_slots,
                daily_cost_estimate,
            });
        }
        Ok(itinerary)
    }

    fn check_budget(
        &self,
        raw: RawBudget,
        advisories: &mut Vec<PlanAdvisory>,
    ) -> Result<BudgetBreakdown, PipelineError> {
        let parts = [
            ("flights", raw.flights),
            ("accommodation", raw.accommodation),
            ("food", raw.food),
            ("localTransport", raw.local_transport),
            ("entryTickets", raw.entry_tickets),
            ("miscellaneous", raw.miscellaneous),
        ];
        for (name, amount) in parts {
            ensure_amount(amount, &format!("budgetBreakdown.{}", name))?;
        }

        let mut breakdown = BudgetBreakdown {
            flights: raw.flights,
            accommodation: raw.accommodation,
            food: raw.food,
            local_transport: raw.local_transport,
            entry_tickets: raw.entry_tickets,
            miscellaneous: raw.miscellaneous,
            total: 0.0,
        };
        let recomputed = breakdown.parts_sum();
        breakdown.total = match raw.total {
            Some(stated) if stated.is_finite() && (stated - recomputed).abs() <= self.cost_tolerance => {
                stated
            }
            stated => {
                advisories.push(PlanAdvisory::BudgetTotalRecomputed { stated, recomputed });
                recomputed
            }
        };
        Ok(breakdown)
    }
}

fn check_slot(slot: RawSlot, path: &str) -> Result<TimeSlot, PipelineError> {
    if slot.place_name.trim().is_empty() {
        return Err(PipelineError::schema(
            format!("{}.placeName", path),
            "must not be empty",
        ));
    }
    ensure_amount(slot.estimated_cost, &format!("{}.estimatedCost", path))?;
    ensure_coordinate(slot.latitude, 90.0, &format!("{}.latitude", path))?;
    ensure_coordinate(slot.longitude, 180.0, &format!("{}.longitude", path))?;

    Ok(TimeSlot {
        time: slot.time,
        place_name: slot.place_name,
        description: slot.description,
        estimated_duration: slot.estimated_duration,
        estimated_cost: slot.estimated_cost,
        latitude: slot.latitude,
        longitude: slot.longitude,
        google_maps_link: slot.google_maps_link,
        travel_time_from_previous: slot.travel_time_from_previous,
        category: slot.category,
    })
}

fn ensure_amount(amount: f64, path: &str) -> Result<(), PipelineError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(PipelineError::schema(
            path,
            format!("must be a non-negative amount, found {}", amount),
        ))
    }
}

fn ensure_coordinate(value: f64, limit: f64, path: &str) -> Result<(), PipelineError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(PipelineError::schema(
            path,
            format!("{} is not within [-{}, {}]", value, limit, limit),
        ))
    }
}

/// Removes one wrapping code fence (with an optional info string such as `json`).
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = match trimmed.strip_prefix(FENCE) {
        Some(rest) => match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
        },
        None => trimmed,
    };
    let body = body.trim_end();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelStyle;
    use serde_json::json;

    fn request() -> TripRequest {
        TripRequest {
            origin: "Mumbai".into(),
            origin_place_id: None,
            destination: "Goa".into(),
            destination_place_id: None,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            budget: 15000.0,
            travel_style: TravelStyle::Family,
            number_of_travelers: 2,
        }
    }

    fn slot(name: &str, cost: f64, lat: f64, lng: f64, category: &str) -> Value {
        json!({
            "time": "09:00 AM",
            "placeName": name,
            "description": "A stop.",
            "estimatedDuration": "1 hour",
            "estimatedCost": cost,
            "latitude": lat,
            "longitude": lng,
            "googleMapsLink": "",
            "travelTimeFromPrevious": "15 min by car",
            "category": category
        })
    }

    fn day(number: u32, date: &str) -> Value {
        json!({
            "dayNumber": number,
            "date": date,
            "theme": "Beaches",
            "timeSlots": [
                slot("Dabolim Airport", 500.0, 15.3808, 73.8314, "transport"),
                slot("Calangute Beach", 0.0, 15.5439, 73.7553, "attraction"),
                slot("Britto's", 1200.0, 15.5525, 73.7517, "restaurant"),
                slot("Taj Holiday Village", 3000.0, 15.4989, 73.7652, "hotel")
            ],
            "dailyCostEstimate": 4700.0
        })
    }

    fn plan() -> Value {
        json!({
            "origin": "Mumbai",
            "destination": "Goa",
            "startDate": "2025-06-01",
            "endDate": "2025-06-03",
            "totalDays": 3,
            "travelStyle": "family",
            "numberOfTravelers": 2,
            "estimatedTotalBudget": 14500.0,
            "itinerary": [day(1, "2025-06-01"), day(2, "2025-06-02"), day(3, "2025-06-03")],
            "budgetBreakdown": {
                "flights": 6000.0,
                "accommodation": 4500.0,
                "food": 2000.0,
                "localTransport": 800.0,
                "entryTickets": 200.0,
                "miscellaneous": 1000.0,
                "total": 14500.0
            },
            "routeOptimization": {
                "clusteringStrategy": "North Goa beaches are grouped together.",
                "distanceMatrixUsage": "Pairwise drive times were compared.",
                "visitOrderOptimization": "Nearest unvisited stop comes next.",
                "totalOptimizedDistance": "85 km across all days"
            }
        })
    }

    fn schema_path(err: PipelineError) -> String {
        match err {
            PipelineError::SchemaViolation { path, .. } => path,
            other => panic!("expected a schema violation, got {other:?}"),
        }
    }

    #[test]
    fn accepts_a_conforming_plan_without_advisories() {
        let validated = PlanValidator::default()
            .validate_value(plan(), &request())
            .unwrap();
        assert!(validated.advisories.is_empty(), "{:?}", validated.advisories);
        let days: Vec<u32> = validated.draft.itinerary.iter().map(|d| d.day_number).collect();
        assert_eq!(days, vec![1, 2, 3]);
        assert_eq!(
            validated.draft.itinerary[2].date,
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()
        );
    }

    #[test]
    fn strips_a_single_wrapping_fence() {
        let text = format!("```json\n{}\n```", plan());
        assert!(PlanValidator::default().validate_text(&text, &request()).is_ok());

        let bare = format!("```\n{}```", plan());
        assert!(PlanValidator::default().validate_text(&bare, &request()).is_ok());
    }

    #[test]
    fn prose_around_json_is_malformed() {
        let text = format!("Here is your plan:\n{}", plan());
        match PlanValidator::default().validate_text(&text, &request()) {
            Err(PipelineError::MalformedOutput { raw, .. }) => assert!(raw.starts_with("Here is")),
            other => panic!("expected malformed output, got {other:?}"),
        }
    }

    #[test]
    fn rejects_gaps_in_day_numbers() {
        let mut value = plan();
        value["itinerary"][2]["dayNumber"] = json!(4);
        let err = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap_err();
        assert_eq!(schema_path(err), "itinerary[2].dayNumber");
    }

    #[test]
    fn rejects_wrong_day_count() {
        let mut value = plan();
        value["itinerary"].as_array_mut().unwrap().pop();
        let err = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap_err();
        assert_eq!(schema_path(err), "itinerary");
    }

    #[test]
    fn rejects_unknown_category_with_its_path() {
        let mut value = plan();
        value["itinerary"][1]["timeSlots"][2]["category"] = json!("shopping");
        let err = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap_err();
        assert_eq!(schema_path(err), "itinerary[1].timeSlots[2].category");
    }

    #[test]
    fn rejects_dates_outside_or_misaligned_with_the_trip() {
        let mut value = plan();
        value["itinerary"][0]["date"] = json!("2025-05-31");
        let err = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap_err();
        assert_eq!(schema_path(err), "itinerary[0].date");

        let mut value = plan();
        value["itinerary"][0]["date"] = json!("2025-06-02");
        let err = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap_err();
        assert_eq!(schema_path(err), "itinerary[0].date");
    }

    #[test]
    fn rejects_empty_days_and_bad_coordinates() {
        let mut value = plan();
        value["itinerary"][1]["timeSlots"] = json!([]);
        let err = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap_err();
        assert_eq!(schema_path(err), "itinerary[1].timeSlots");

        let mut value = plan();
        value["itinerary"][0]["timeSlots"][3]["latitude"] = json!(91.0);
        let err = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap_err();
        assert_eq!(schema_path(err), "itinerary[0].timeSlots[3].latitude");
    }

    #[test]
    fn missing_required_field_is_a_violation() {
        let mut value = plan();
        value["itinerary"][0]["timeSlots"][0]
            .as_object_mut()
            .unwrap()
            .remove("placeName");
        let err = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap_err();
        assert!(schema_path(err).starts_with("itinerary[0].timeSlots[0]"));
    }

    #[test]
    fn repairs_a_wrong_budget_total() {
        let mut value = plan();
        value["budgetBreakdown"]["total"] = json!(20000.0);
        let validated = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap();
        let breakdown = &validated.draft.budget_breakdown;
        assert_eq!(breakdown.total, breakdown.parts_sum());
        assert_eq!(breakdown.total, 14500.0);
        assert!(validated.advisories.contains(&PlanAdvisory::BudgetTotalRecomputed {
            stated: Some(20000.0),
            recomputed: 14500.0,
        }));
    }

    #[test]
    fn repairs_daily_cost_and_defaults_descriptions() {
        let mut value = plan();
        value["itinerary"][0]["dailyCostEstimate"] = json!(9999.0);
        value["itinerary"][1]["timeSlots"][0]
            .as_object_mut()
            .unwrap()
            .remove("description");
        value["itinerary"][1]["theme"] = Value::Null;
        let validated = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap();
        assert_eq!(validated.draft.itinerary[0].daily_cost_estimate, 4700.0);
        assert_eq!(validated.draft.itinerary[1].time_slots[0].description, "");
        assert_eq!(validated.draft.itinerary[1].theme, "");
    }

    #[test]
    fn budget_far_from_request_is_only_advisory() {
        let mut value = plan();
        value["estimatedTotalBudget"] = json!(40000.0);
        let validated = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap();
        assert!(matches!(
            validated.advisories.as_slice(),
            [PlanAdvisory::BudgetOutsideTolerance { .. }]
        ));
    }

    #[test]
    fn short_days_and_empty_narrative_are_advisory() {
        let mut value = plan();
        value["itinerary"][2]["timeSlots"]
            .as_array_mut()
            .unwrap()
            .truncate(2);
        value["itinerary"][2]["dailyCostEstimate"] = json!(500.0);
        value["routeOptimization"]["clusteringStrategy"] = json!("");
        let validated = PlanValidator::default()
            .validate_value(value, &request())
            .unwrap();
        assert!(validated
            .advisories
            .contains(&PlanAdvisory::SlotCountOutOfRange { day_number: 3, count: 2 }));
        assert!(validated.advisories.contains(&PlanAdvisory::EmptyRouteNarrative));
    }

    #[test]
    fn strip_code_fence_leaves_plain_text_alone() {
        assert_eq!(strip_code_fence("  {\"a\":1}\n"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```JSON [1, 2]```"), "[1, 2]");
    }
}
