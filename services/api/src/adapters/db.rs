//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `TripStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.
//!
//! Each trip is one row keyed by its id; the full plan lives in a JSONB column so
//! reads always return the exact shape that was written.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itinerary_core::domain::TripPlan;
use itinerary_core::ports::{PortError, PortResult, TripStore};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `TripStore` port.
#[derive(Clone)]
pub struct PgTripStore {
    pool: PgPool,
}

impl PgTripStore {
    /// Creates a new `PgTripStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct TripRecord {
    plan: Json<TripPlan>,
    updated_at: DateTime<Utc>,
}
impl TripRecord {
    fn to_domain(self) -> TripPlan {
        let mut plan = self.plan.0;
        plan.updated_at = Some(self.updated_at);
        plan
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// `TripStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl TripStore for PgTripStore {
    async fn upsert_trip(&self, trip: &TripPlan) -> PortResult<()> {
        let result = sqlx::query(
            "INSERT INTO trips (id, user_id, plan, created_at, updated_at)
             VALUES ($1, $2, $3, $4, NOW())
             ON CONFLICT (id) DO UPDATE
             SET plan = EXCLUDED.plan, updated_at = NOW()
             WHERE trips.user_id = EXCLUDED.user_id",
        )
        .bind(&trip.id)
        .bind(&trip.user_id)
        .bind(Json(trip))
        .bind(trip.created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(PortError::Unexpected(format!(
                "Trip {} is owned by another user",
                trip.id
            )));
        }
        Ok(())
    }

    async fn get_trip(&self, trip_id: &str) -> PortResult<TripPlan> {
        let record = sqlx::query_as::<_, TripRecord>(
            "SELECT plan, updated_at FROM trips WHERE id = $1",
        )
        .bind(trip_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        record
            .map(TripRecord::to_domain)
            .ok_or_else(|| PortError::NotFound(format!("Trip {} not found", trip_id)))
    }

    async fn list_trips_for_user(&self, user_id: &str, limit: usize) -> PortResult<Vec<TripPlan>> {
        let records = sqlx::query_as::<_, TripRecord>(
            "SELECT plan, updated_at FROM trips
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(TripRecord::to_domain).collect())
    }

    async fn delete_trip(&self, trip_id: &str, user_id: &str) -> PortResult<bool> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1 AND user_id = $2")
            .bind(trip_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(result.rows_affected() > 0)
    }
}
