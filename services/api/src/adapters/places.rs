//! services/api/src/adapters/places.rs
//!
//! Google Places autocomplete adapter. Implements the `PlacesService` port with a
//! plain `reqwest` client against the Places Autocomplete JSON API.

use std::time::Duration;

use async_trait::async_trait;
use itinerary_core::domain::PlaceSuggestion;
use itinerary_core::ports::{PlacesService, PortError, PortResult};
use serde::Deserialize;
use tracing::{debug, warn};

pub const GOOGLE_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Queries shorter than this never reach the upstream API.
pub const MIN_QUERY_CHARS: usize = 2;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct GooglePlacesAdapter {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GooglePlacesAdapter {
    /// Without an API key every lookup returns no suggestions.
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, GOOGLE_PLACES_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
struct Prediction {
    place_id: String,
    description: String,
    #[serde(default)]
    structured_formatting: Option<StructuredFormatting>,
}

#[derive(Deserialize, Default)]
struct StructuredFormatting {
    #[serde(default)]
    main_text: String,
    #[serde(default)]
    secondary_text: String,
}

impl Prediction {
    fn into_suggestion(self) -> PlaceSuggestion {
        let formatting = self.structured_formatting.unwrap_or_default();
        PlaceSuggestion {
            place_id: self.place_id,
            description: self.description,
            main_text: formatting.main_text,
            secondary_text: formatting.secondary_text,
        }
    }
}

#[async_trait]
impl PlacesService for GooglePlacesAdapter {
    async fn autocomplete(&self, query: &str) -> PortResult<Vec<PlaceSuggestion>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("GOOGLE_MAPS_API_KEY not set; returning no suggestions");
            return Ok(Vec::new());
        };

        let url = format!("{}/autocomplete/json", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("input", query), ("types", "(cities)"), ("key", api_key)])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PortError::Timeout(e.to_string())
                } else {
                    PortError::Transport(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(PortError::Unexpected(format!(
                "places API responded with HTTP {}",
                response.status()
            )));
        }

        let body: AutocompleteResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(body
                .predictions
                .into_iter()
                .map(Prediction::into_suggestion)
                .collect()),
            status => {
                warn!(
                    "Places API returned status {}: {}",
                    status,
                    body.error_message.as_deref().unwrap_or("no message")
                );
                Err(PortError::Unexpected(format!(
                    "places API returned status {}",
                    status
                )))
            }
        }
    }
}
