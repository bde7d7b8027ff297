//! services/api/src/adapters/generation_llm.rs
//!
//! This module contains the adapter for the itinerary generation LLM.
//! It implements the `ItineraryGenerationService` port from the `core` crate.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use itinerary_core::ports::{
    GenerationPrompt, ItineraryGenerationService, PortError, PortResult,
};
use tracing::{debug, info};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ItineraryGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiItineraryAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl OpenAiItineraryAdapter {
    /// Creates a new `OpenAiItineraryAdapter`.
    pub fn new(
        client: Client<OpenAIConfig>,
        model: String,
        temperature: f32,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            model,
            temperature,
            max_tokens,
            timeout,
        }
    }
}

/// Builds the OpenAI client used by the adapter.
///
/// The client's built-in backoff is disabled: rate limits and server errors
/// surface on the first response, and the pipeline's transport retry policy is
/// the only retry loop.
pub fn openai_client(api_key: &str, api_base: Option<&str>) -> Client<OpenAIConfig> {
    let mut config = OpenAIConfig::new().with_api_key(api_key);
    if let Some(api_base) = api_base {
        config = config.with_api_base(api_base);
    }
    let no_retry = ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build();
    Client::with_config(config).with_backoff(no_retry)
}

fn map_openai_error(e: OpenAIError) -> PortError {
    match e {
        OpenAIError::Reqwest(inner) => PortError::Transport(inner.to_string()),
        other => PortError::Unexpected(other.to_string()),
    }
}

//=========================================================================================
// `ItineraryGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ItineraryGenerationService for OpenAiItineraryAdapter {
    /// Requests a single JSON-object completion for the rendered prompt.
    async fn generate(&self, prompt: &GenerationPrompt) -> PortResult<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .response_format(ResponseFormat::JsonObject)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(prompt.system.as_str())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt.user.as_str())
                    .build()
                    .map_err(|e| PortError::Unexpected(e.to_string()))?
                    .into(),
            ])
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        debug!("Sending itinerary prompt to model {}", self.model);
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                PortError::Timeout(format!(
                    "generation did not complete within {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(map_openai_error)?;

        if let Some(usage) = &response.usage {
            info!(
                "Generation finished: {} prompt tokens, {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| PortError::Unexpected("completion had no choices".to_string()))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}
