//! crates/itinerary_core/src/geo.rs
//!
//! Deterministic map links for validated itineraries. No network calls.

use crate::domain::{DayItinerary, TimeSlot};

pub const TRAVEL_MODE: &str = "driving";

/// Location-pin link for a single coordinate.
pub fn pin_link(latitude: f64, longitude: f64) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        latitude, longitude
    )
}

/// Directions link between two coordinates.
pub fn directions_link(from: (f64, f64), to: (f64, f64), travel_mode: &str) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}&travelmode={}",
        from.0, from.1, to.0, to.1, travel_mode
    )
}

/// Rewrites every slot's `google_maps_link`.
///
/// The first slot of a day gets a pin link; every later slot gets driving
/// directions from the slot before it. Transport slots are linked the same
/// way and keep their generated travel-time text untouched. Running this more
/// than once yields the same links.
pub fn enrich_with_map_links(itinerary: &mut [DayItinerary]) {
    for day in itinerary {
        enrich_day(&mut day.time_slots);
    }
}

fn enrich_day(slots: &mut [TimeSlot]) {
    let mut previous: Option<(f64, f64)> = None;
    for slot in slots.iter_mut() {
        let here = (slot.latitude, slot.longitude);
        slot.google_maps_link = match previous {
            None => pin_link(here.0, here.1),
            Some(from) => directions_link(from, here, TRAVEL_MODE),
        };
        previous = Some(here);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SlotCategory;
    use chrono::NaiveDate;

    fn slot(lat: f64, lng: f64, category: SlotCategory) -> TimeSlot {
        TimeSlot {
            time: "10:00 AM".into(),
            place_name: "Somewhere".into(),
            description: String::new(),
            estimated_duration: "1 hour".into(),
            estimated_cost: 0.0,
            latitude: lat,
            longitude: lng,
            google_maps_link: "https://stale.example".into(),
            travel_time_from_previous: "20 min by taxi".into(),
            category,
        }
    }

    fn itinerary() -> Vec<DayItinerary> {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        vec![
            DayItinerary {
                day_number: 1,
                date,
                theme: "Arrival".into(),
                time_slots: vec![
                    slot(15.3808, 73.8314, SlotCategory::Transport),
                    slot(15.5439, 73.7553, SlotCategory::Attraction),
                    slot(-8.5, 115.25, SlotCategory::Transport),
                ],
                daily_cost_estimate: 0.0,
            },
            DayItinerary {
                day_number: 2,
                date: date.succ_opt().unwrap(),
                theme: "Old Goa".into(),
                time_slots: vec![slot(15.5, 73.9, SlotCategory::Hotel)],
                daily_cost_estimate: 0.0,
            },
        ]
    }

    #[test]
    fn first_slot_gets_a_pin_and_later_slots_get_directions() {
        let mut days = itinerary();
        enrich_with_map_links(&mut days);

        let first = &days[0].time_slots;
        assert_eq!(
            first[0].google_maps_link,
            "https://www.google.com/maps/search/?api=1&query=15.3808,73.8314"
        );
        assert_eq!(
            first[1].google_maps_link,
            "https://www.google.com/maps/dir/?api=1&origin=15.3808,73.8314&destination=15.5439,73.7553&travelmode=driving"
        );
        assert_eq!(
            first[2].google_maps_link,
            "https://www.google.com/maps/dir/?api=1&origin=15.5439,73.7553&destination=-8.5,115.25&travelmode=driving"
        );
        assert_eq!(
            days[1].time_slots[0].google_maps_link,
            "https://www.google.com/maps/search/?api=1&query=15.5,73.9"
        );
    }

    #[test]
    fn enrichment_is_idempotent() {
        let mut once = itinerary();
        enrich_with_map_links(&mut once);
        let mut twice = once.clone();
        enrich_with_map_links(&mut twice);
        assert_eq!(once, twice);
    }

    #[test]
    fn transport_slots_keep_their_travel_time_text() {
        let mut days = itinerary();
        enrich_with_map_links(&mut days);
        assert_eq!(days[0].time_slots[2].travel_time_from_previous, "20 min by taxi");
    }

    #[test]
    fn whole_degrees_render_without_a_fraction() {
        assert_eq!(
            pin_link(15.0, -74.0),
            "https://www.google.com/maps/search/?api=1&query=15,-74"
        );
    }
}
