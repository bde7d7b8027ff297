//! crates/itinerary_core/src/prompt.rs
//!
//! Renders a validated trip request into the instruction pair sent to the
//! generation service. Rendering is deterministic: the same request always
//! produces the same prompt.

use crate::domain::TripRequest;
use crate::ports::GenerationPrompt;

pub const SYSTEM_INSTRUCTIONS: &str = "You are a precise travel planning AI that outputs only valid JSON. \
Never wrap the JSON in markdown formatting or code fences, and never add explanations before or after it.";

/// The exact output shape the plan validator parses against.
pub const PLAN_OUTPUT_SCHEMA: &str = r#"{
  "origin": "string",
  "destination": "string",
  "startDate": "YYYY-MM-DD",
  "endDate": "YYYY-MM-DD",
  "totalDays": number,
  "travelStyle": "string",
  "numberOfTravelers": number,
  "estimatedTotalBudget": number,
  "itinerary": [
    {
      "dayNumber": number,
      "date": "YYYY-MM-DD",
      "theme": "string",
      "timeSlots": [
        {
          "time": "HH:MM AM/PM",
          "placeName": "string",
          "description": "string",
          "estimatedDuration": "string",
          "estimatedCost": number,
          "latitude": number,
          "longitude": number,
          "googleMapsLink": "",
          "travelTimeFromPrevious": "string",
          "category": "attraction|restaurant|transport|hotel|activity"
        }
      ],
      "dailyCostEstimate": number
    }
  ],
  "budgetBreakdown": {
    "flights": number,
    "accommodation": number,
    "food": number,
    "localTransport": number,
    "entryTickets": number,
    "miscellaneous": number,
    "total": number
  },
  "routeOptimization": {
    "clusteringStrategy": "string (2-3 sentences on how places are grouped by area or neighborhood)",
    "distanceMatrixUsage": "string (2-3 sentences on how travel times between all point pairs are estimated)",
    "visitOrderOptimization": "string (2-3 sentences on the nearest-neighbor ordering of each day's stops)",
    "totalOptimizedDistance": "string (e.g. '45 km across all days')"
  }
}"#;

const PLAN_PROMPT_TEMPLATE: &str = r#"You are an expert travel planner. Create a detailed, day-by-day travel itinerary for this trip:

Origin (traveling from): {origin}
Destination: {destination}
Start date: {start_date}
End date: {end_date}
Total days: {total_days}
Budget: {budget} {currency} (total for all travelers)
Travel style: {travel_style}
Number of travelers: {travelers}

Produce a structured JSON plan that covers:

1. Travel to and from the destination: realistic flight, train or bus options from {origin} to {destination}, approximate duration, and cost per person in {currency}. Include both the outbound and the return journey in the itinerary.

2. Accommodation matching the "{travel_style}" style: real hotel, hostel or resort names, a nightly rate estimate, and their proximity to the day's attractions.

3. A day-wise itinerary. Every day has between 4 and 6 time slots, and every time slot has:
   - a specific time (e.g. "09:00 AM")
   - a real place name (actual attractions, restaurants, stations, hotels)
   - a short description (1-2 sentences)
   - an estimated visit duration
   - an estimated cost per person in {currency}
   - latitude and longitude coordinates
   - a category: attraction, restaurant, transport, hotel, or activity
   - the travel time from the previous location

4. Distinctive experiences where they fit: local tours, cultural workshops, food and market walks, nature excursions, water sports or hikes.

5. A budget breakdown with totals for: flights or travel to and from the destination (all travelers), accommodation (all nights), food and dining, local transport, entry tickets, and a miscellaneous buffer of roughly 10% of the total. The total must equal the sum of those six parts.

6. Route optimization notes explaining how places are clustered by geographic proximity, how a distance matrix of travel times informs the routes, how the visit order is chosen (nearest-neighbor heuristic), and an estimate of the total optimized distance.

7. A short theme for each day (e.g. "Arrival & City Welcome", "Historical Old Town", "Beach & Relaxation", "Departure").

Hard constraints:
- Day 1 must begin with arrival from {origin} at {destination}.
- The last day must include the departure or return journey.
- Day numbers run from 1 to {total_days}; day N falls on the Nth date counting from {start_date}.
- All monetary values are in {currency} and realistic for the {travel_style} travel style.
- The total budget should be close to {budget} {currency}.
- Places must be real-world entities that exist at the destination.
- Coordinates must be accurate decimal degrees.
- Order each day's places to minimize travel time, and respect opening hours.
- Leave every "googleMapsLink" as an empty string.
{place_ids}
Respond ONLY with valid JSON matching this exact schema:
{schema}"#;

/// Renders trip requests into generation prompts.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    currency: String,
}

impl PromptBuilder {
    /// Creates a builder that states every amount in `currency` (e.g. "INR").
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn build(&self, request: &TripRequest) -> GenerationPrompt {
        let start_date = request.start_date.to_string();
        let end_date = request.end_date.to_string();
        let total_days = request.total_days().to_string();
        let budget = request.budget.to_string();
        let travelers = request.number_of_travelers.to_string();
        let place_ids = place_id_lines(request);

        let user = render(
            PLAN_PROMPT_TEMPLATE,
            &[
                ("schema", PLAN_OUTPUT_SCHEMA),
                ("origin", request.origin.as_str()),
                ("destination", request.destination.as_str()),
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("total_days", total_days.as_str()),
                ("budget", budget.as_str()),
                ("currency", self.currency.as_str()),
                ("travel_style", request.travel_style.as_str()),
                ("travelers", travelers.as_str()),
                ("place_ids", place_ids.as_str()),
            ],
        );

        GenerationPrompt {
            system: SYSTEM_INSTRUCTIONS.to_string(),
            user,
        }
    }
}

/// Fills `{name}` placeholders in a single left-to-right pass. Substituted text is
/// never scanned again; braces that do not name a known value are kept verbatim.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 1024);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new("INR")
    }
}

fn place_id_lines(request: &TripRequest) -> String {
    let mut lines = String::new();
    if let Some(id) = &request.origin_place_id {
        lines.push_str(&format!("- The origin resolves to place id {}.\n", id));
    }
    if let Some(id) = &request.destination_place_id {
        lines.push_str(&format!("- The destination resolves to place id {}.\n", id));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelStyle;
    use chrono::NaiveDate;

    fn request() -> TripRequest {
        TripRequest {
            origin: "Mumbai".into(),
            origin_place_id: None,
            destination: "Goa".into(),
            destination_place_id: Some("ChIJQbc2YxC6vzsRkkDzYv-H-Oo".into()),
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            budget: 15000.0,
            travel_style: TravelStyle::Family,
            number_of_travelers: 2,
        }
    }

    #[test]
    fn embeds_every_request_field() {
        let prompt = PromptBuilder::default().build(&request());
        for needle in [
            "Origin (traveling from): Mumbai",
            "Destination: Goa",
            "Start date: 2025-06-01",
            "End date: 2025-06-03",
            "Total days: 3",
            "Budget: 15000 INR",
            "Travel style: family",
            "Number of travelers: 2",
            "place id ChIJQbc2YxC6vzsRkkDzYv-H-Oo",
        ] {
            assert!(prompt.user.contains(needle), "missing `{}`", needle);
        }
    }

    #[test]
    fn leaves_no_unrendered_placeholders() {
        let prompt = PromptBuilder::default().build(&request());
        for placeholder in ["{origin}", "{budget}", "{currency}", "{schema}", "{place_ids}"] {
            assert!(!prompt.user.contains(placeholder));
        }
    }

    #[test]
    fn states_the_hard_constraints() {
        let prompt = PromptBuilder::new("USD").build(&request());
        assert!(prompt.user.contains("Day 1 must begin with arrival from Mumbai at Goa"));
        assert!(prompt.user.contains("last day must include the departure"));
        assert!(prompt.user.contains("All monetary values are in USD"));
        assert!(prompt.user.contains("between 4 and 6 time slots"));
        assert!(prompt.user.ends_with(PLAN_OUTPUT_SCHEMA));
        assert!(prompt.system.contains("only valid JSON"));
    }

    #[test]
    fn user_text_that_looks_like_a_placeholder_is_kept_literally() {
        let mut request = request();
        request.origin = "Pune {destination}".into();
        request.destination_place_id = Some("{origin}".into());

        let prompt = PromptBuilder::default().build(&request);
        assert!(prompt.user.contains("Origin (traveling from): Pune {destination}"));
        assert!(prompt.user.contains("Destination: Goa"));
        assert!(prompt.user.contains("place id {origin}."));
    }

    #[test]
    fn render_keeps_unknown_braces() {
        assert_eq!(render("{a} {b} {", &[("a", "x")]), "x {b} {");
    }

    #[test]
    fn rendering_is_deterministic() {
        let builder = PromptBuilder::default();
        assert_eq!(builder.build(&request()), builder.build(&request()));
    }
}
