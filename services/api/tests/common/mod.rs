//! Shared fixtures for the HTTP tests: fake collaborators, a test config and a
//! router wired the same way the binary wires it.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use api_lib::adapters::InMemoryTripStore;
use api_lib::config::Config;
use api_lib::web::{router, AppState};
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use itinerary_core::{
    GenerationPrompt, IdentityProvider, ItineraryGenerationService, PipelineOptions,
    PlaceSuggestion, PlacesService, PortError, PortResult, TripPipeline, TripStore,
};
use serde_json::{json, Value};

const BODY_LIMIT: usize = 1_048_576;

//=========================================================================================
// Fake Collaborators
//=========================================================================================

pub struct FakeGenerator {
    reply: PortResult<String>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn replying(reply: PortResult<String>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItineraryGenerationService for FakeGenerator {
    async fn generate(&self, _prompt: &GenerationPrompt) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

pub struct FakePlaces;

#[async_trait]
impl PlacesService for FakePlaces {
    async fn autocomplete(&self, query: &str) -> PortResult<Vec<PlaceSuggestion>> {
        if query.trim().chars().count() < 2 {
            return Ok(Vec::new());
        }
        Ok(vec![PlaceSuggestion {
            place_id: "ChIJgoa".into(),
            description: "Goa, India".into(),
            main_text: "Goa".into(),
            secondary_text: "India".into(),
        }])
    }
}

/// Accepts `<name>-token` bearer tokens for alice and bob.
pub struct FakeIdentity;

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn resolve_user(&self, bearer_token: &str) -> PortResult<Option<String>> {
        match bearer_token {
            "alice-token" => Ok(Some("alice".into())),
            "bob-token" => Ok(Some("bob".into())),
            "broken-token" => Err(PortError::Unexpected("verifier offline".into())),
            _ => Ok(None),
        }
    }
}

//=========================================================================================
// App Construction
//=========================================================================================

pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: tracing::Level::INFO,
        environment: "production".into(),
        database_url: None,
        openai_api_key: None,
        openai_base_url: None,
        generation_model: "test-model".into(),
        generation_temperature: 0.4,
        generation_max_tokens: 8000,
        generation_timeout: Duration::from_secs(5),
        generation_transport_retries: 0,
        google_maps_api_key: None,
        allow_anonymous: true,
        anonymous_user_id: "dev-user".into(),
        cors_allowed_origin: "*".into(),
        budget_tolerance: 0.25,
        currency: "INR".into(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub generator: Arc<FakeGenerator>,
    pub store: Arc<InMemoryTripStore>,
}

pub fn build_app(config: Config, generator: Arc<FakeGenerator>) -> TestApp {
    let store = Arc::new(InMemoryTripStore::new());
    let pipeline = TripPipeline::new(
        generator.clone(),
        store.clone(),
        PipelineOptions {
            currency: config.currency.clone(),
            budget_tolerance: config.budget_tolerance,
            ..PipelineOptions::default()
        },
    );
    let state = Arc::new(AppState {
        pipeline: Arc::new(pipeline),
        store: store.clone() as Arc<dyn TripStore>,
        places: Arc::new(FakePlaces),
        identity: Arc::new(FakeIdentity),
        config: Arc::new(config),
    });
    TestApp {
        router: router(state),
        generator,
        store,
    }
}

pub fn default_app() -> TestApp {
    build_app(
        test_config(),
        FakeGenerator::replying(Ok(goa_plan_json().to_string())),
    )
}

//=========================================================================================
// Request/Response Helpers
//=========================================================================================

pub fn json_request(method: &str, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

//=========================================================================================
// Payload Fixtures
//=========================================================================================

pub fn goa_form() -> Value {
    json!({
        "origin": "Mumbai",
        "destination": "Goa",
        "startDate": "2025-06-01",
        "endDate": "2025-06-03",
        "budget": 15000,
        "travelStyle": "family",
        "numberOfTravelers": 2
    })
}

/// A well-formed three-day plan for `goa_form`, wrapped the way models often wrap JSON.
pub fn goa_plan_json() -> String {
    let slots = json!([
        { "time": "10:00 AM", "placeName": "Dabolim Airport", "description": "Arrive and transfer.",
          "estimatedDuration": "1 hour", "estimatedCost": 2500, "latitude": 15.3808,
          "longitude": 73.8314, "googleMapsLink": "", "travelTimeFromPrevious": "",
          "category": "transport" },
        { "time": "12:30 PM", "placeName": "Fort Aguada", "description": "Lighthouse and ramparts.",
          "estimatedDuration": "2 hours", "estimatedCost": 100, "latitude": 15.4925,
          "longitude": 73.7734, "googleMapsLink": "", "travelTimeFromPrevious": "40 min",
          "category": "attraction" },
        { "time": "03:00 PM", "placeName": "Candolim Beach", "description": "Swim and rest.",
          "estimatedDuration": "2 hours", "estimatedCost": 0, "latitude": 15.5167,
          "longitude": 73.7620, "googleMapsLink": "", "travelTimeFromPrevious": "10 min",
          "category": "activity" },
        { "time": "07:30 PM", "placeName": "Fisherman's Wharf", "description": "Goan seafood dinner.",
          "estimatedDuration": "1.5 hours", "estimatedCost": 1900, "latitude": 15.5010,
          "longitude": 73.8270, "googleMapsLink": "", "travelTimeFromPrevious": "25 min",
          "category": "restaurant" }
    ]);
    let days: Vec<Value> = (1..=3)
        .map(|n| {
            json!({
                "dayNumber": n,
                "date": format!("2025-06-0{}", n),
                "theme": "Beaches and Forts",
                "timeSlots": slots.clone(),
                "dailyCostEstimate": 4500
            })
        })
        .collect();
    let plan = json!({
        "estimatedTotalBudget": 14800,
        "itinerary": days,
        "budgetBreakdown": {
            "flights": 7000, "accommodation": 4200, "food": 1800,
            "localTransport": 600, "entryTickets": 200, "miscellaneous": 1000,
            "total": 14800
        },
        "routeOptimization": {
            "clusteringStrategy": "North Goa stops are grouped per day.",
            "distanceMatrixUsage": "Pairwise drive times decided the order.",
            "visitOrderOptimization": "Nearest neighbour from the airport.",
            "totalOptimizedDistance": "About 120 km"
        }
    });
    format!("```json\n{}\n```", plan)
}
