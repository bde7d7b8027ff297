//! services/api/src/adapters/memory.rs
//!
//! A process-local `TripStore`, used when no `DATABASE_URL` is configured and by
//! the service tests. Trips live for the lifetime of the process.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use itinerary_core::domain::TripPlan;
use itinerary_core::ports::{PortError, PortResult, TripStore};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryTripStore {
    trips: RwLock<HashMap<String, TripPlan>>,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    async fn upsert_trip(&self, trip: &TripPlan) -> PortResult<()> {
        let mut trips = self.trips.write().await;
        if let Some(existing) = trips.get(&trip.id) {
            if existing.user_id != trip.user_id {
                return Err(PortError::Unexpected(format!(
                    "Trip {} is owned by another user",
                    trip.id
                )));
            }
        }
        let mut stored = trip.clone();
        stored.updated_at = Some(Utc::now());
        trips.insert(stored.id.clone(), stored);
        Ok(())
    }

    async fn get_trip(&self, trip_id: &str) -> PortResult<TripPlan> {
        self.trips
            .read()
            .await
            .get(trip_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Trip {} not found", trip_id)))
    }

    async fn list_trips_for_user(&self, user_id: &str, limit: usize) -> PortResult<Vec<TripPlan>> {
        let trips = self.trips.read().await;
        let mut owned: Vec<TripPlan> = trips
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned.truncate(limit);
        Ok(owned)
    }

    async fn delete_trip(&self, trip_id: &str, user_id: &str) -> PortResult<bool> {
        let mut trips = self.trips.write().await;
        match trips.get(trip_id) {
            Some(trip) if trip.user_id == user_id => {
                trips.remove(trip_id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
