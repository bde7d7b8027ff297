//! crates/itinerary_core/src/pipeline.rs
//!
//! The trip generation pipeline:
//! input validation -> prompt -> generation -> plan validation/repair ->
//! geo enrichment -> assembly -> store.
//!
//! Each invocation is independent and holds no shared mutable state. Stages run
//! strictly in order and the first failing stage fails the whole request. The
//! store is written only after every earlier stage succeeded, so dropping the
//! future part-way leaves nothing behind.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::assembly::{assemble_trip, generate_trip_id};
use crate::domain::{TripFormInput, TripPlan};
use crate::error::PipelineError;
use crate::geo::enrich_with_map_links;
use crate::plan_validator::{PlanAdvisory, PlanValidator, ValidatedPlan, DEFAULT_BUDGET_TOLERANCE};
use crate::ports::{GenerationPrompt, ItineraryGenerationService, PortError, TripStore};
use crate::prompt::PromptBuilder;
use crate::validation::validate_trip_request;

/// Tunables for [`TripPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Currency unit every amount in the prompt is stated in.
    pub currency: String,
    /// Advisory band around the requested budget, as a fraction.
    pub budget_tolerance: f64,
    /// Extra attempts after a transport failure or timeout. Zero disables retries.
    pub transport_retries: u32,
    /// Delay before the first retry; doubled for each further retry.
    pub retry_backoff: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            currency: "INR".to_string(),
            budget_tolerance: DEFAULT_BUDGET_TOLERANCE,
            transport_retries: 0,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// A successfully generated and stored trip, with any advisories raised on the way.
#[derive(Debug, Clone)]
pub struct GeneratedTrip {
    pub plan: TripPlan,
    pub advisories: Vec<PlanAdvisory>,
}

pub struct TripPipeline {
    generator: Arc<dyn ItineraryGenerationService>,
    store: Arc<dyn TripStore>,
    prompts: PromptBuilder,
    validator: PlanValidator,
    transport_retries: u32,
    retry_backoff: Duration,
}

impl TripPipeline {
    pub fn new(
        generator: Arc<dyn ItineraryGenerationService>,
        store: Arc<dyn TripStore>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            generator,
            store,
            prompts: PromptBuilder::new(options.currency),
            validator: PlanValidator::new(options.budget_tolerance),
            transport_retries: options.transport_retries,
            retry_backoff: options.retry_backoff,
        }
    }

    /// Runs the whole pipeline for one submitted form on behalf of `user_id`.
    pub async fn generate_trip(
        &self,
        input: &TripFormInput,
        user_id: &str,
    ) -> Result<GeneratedTrip, PipelineError> {
        let request = validate_trip_request(input)?;
        info!(
            "Generating {}-day {} trip {} -> {} for user {}",
            request.total_days(),
            request.travel_style,
            request.origin,
            request.destination,
            user_id
        );

        let prompt = self.prompts.build(&request);
        let raw = self.call_generator(&prompt).await?;

        let ValidatedPlan {
            mut draft,
            advisories,
        } = self.validator.validate_text(&raw, &request)?;
        enrich_with_map_links(&mut draft.itinerary);

        let plan = assemble_trip(
            &request,
            draft,
            generate_trip_id(),
            user_id.to_string(),
            Utc::now(),
        );

        self.store
            .upsert_trip(&plan)
            .await
            .map_err(PipelineError::Store)?;
        info!("Trip {} generated and stored", plan.id);

        Ok(GeneratedTrip { plan, advisories })
    }

    /// Calls the generator, retrying only transport failures and timeouts.
    async fn call_generator(&self, prompt: &GenerationPrompt) -> Result<String, PipelineError> {
        let mut attempt = 0u32;
        loop {
            match self.generator.generate(prompt).await {
                Ok(text) if text.trim().is_empty() => {
                    return Err(PipelineError::Generation(PortError::Unexpected(
                        "generation service returned an empty completion".to_string(),
                    )))
                }
                Ok(text) => return Ok(text),
                Err(e) => {
                    let err = PipelineError::Generation(e);
                    if !err.is_retryable() || attempt >= self.transport_retries {
                        return Err(err);
                    }
                    let delay = self.retry_backoff * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    warn!(
                        "Generation attempt {} failed ({}); retrying in {:?}",
                        attempt, err, delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
