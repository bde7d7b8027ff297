//! crates/itinerary_core/src/error.rs
//!
//! The failure taxonomy of the trip generation pipeline.

use crate::ports::PortError;

/// Longest slice of raw generator output kept on a `MalformedOutput` error.
pub const RAW_OUTPUT_PREVIEW_CHARS: usize = 500;

/// A rejected trip request, naming the first offending field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every way a single trip generation can fail.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The request itself is invalid. Never retried.
    #[error("Invalid trip request: {0}")]
    Validation(#[from] ValidationError),

    /// The generation service could not be reached or answered with a failure.
    #[error("Itinerary generation failed: {0}")]
    Generation(PortError),

    /// The generator answered, but not with parseable JSON.
    #[error("Generator output is not valid JSON: {reason}")]
    MalformedOutput { raw: String, reason: String },

    /// The generator answered with JSON that does not fit the plan shape.
    #[error("Generated plan violates the schema at `{path}`: {message}")]
    SchemaViolation { path: String, message: String },

    /// The finished plan could not be persisted.
    #[error("Failed to store trip: {0}")]
    Store(PortError),
}

impl PipelineError {
    pub fn malformed(raw: &str, reason: impl Into<String>) -> Self {
        PipelineError::MalformedOutput {
            raw: raw.chars().take(RAW_OUTPUT_PREVIEW_CHARS).collect(),
            reason: reason.into(),
        }
    }

    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::SchemaViolation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code for structured responses.
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "VALIDATION_ERROR",
            PipelineError::Generation(_) => "GENERATION_ERROR",
            PipelineError::MalformedOutput { .. } => "MALFORMED_OUTPUT",
            PipelineError::SchemaViolation { .. } => "SCHEMA_VIOLATION",
            PipelineError::Store(_) => "STORE_ERROR",
        }
    }

    /// Only transport-level generation failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PipelineError::Generation(e) if e.is_transient())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_output_keeps_a_bounded_preview() {
        let raw = "x".repeat(RAW_OUTPUT_PREVIEW_CHARS * 2);
        match PipelineError::malformed(&raw, "eof") {
            PipelineError::MalformedOutput { raw, .. } => {
                assert_eq!(raw.len(), RAW_OUTPUT_PREVIEW_CHARS)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn only_transient_generation_errors_are_retryable() {
        assert!(PipelineError::Generation(PortError::Timeout("60s".into())).is_retryable());
        assert!(PipelineError::Generation(PortError::Transport("reset".into())).is_retryable());
        assert!(!PipelineError::Generation(PortError::Unexpected("401".into())).is_retryable());
        assert!(!PipelineError::schema("itinerary", "empty").is_retryable());
    }
}
