use std::time::Duration;
use thiserror::Error;

/// Failures of the range generation workflow.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("Invalid partition: {parts} part(s) over {total} item(s)")]
    InvalidPartition { total: u32, parts: u32 },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Model refused to generate response: {0}")]
    Refused(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Duplicate image number: {0}")]
    DuplicateImageNumber(u32),

    #[error("Incomplete result: expected {expected} prompts, got {received} (missing {missing:?})")]
    IncompleteResult {
        expected: usize,
        received: usize,
        missing: Vec<u32>,
    },

    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl GenerationError {
    /// Stable identifier for logs and error details.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::InvalidPartition { .. } => "invalid_partition",
            GenerationError::Timeout(_) => "timeout",
            GenerationError::Refused(_) => "refused",
            GenerationError::MalformedResponse(_) => "malformed_response",
            GenerationError::UnexpectedShape(_) => "unexpected_shape",
            GenerationError::InvalidRecord { .. } => "invalid_record",
            GenerationError::DuplicateImageNumber(_) => "duplicate_image_number",
            GenerationError::IncompleteResult { .. } => "incomplete_result",
            GenerationError::Provider { .. } => "provider_error",
            GenerationError::Transport(_) => "transport_error",
        }
    }

    /// True when the provider returned something that breaks the output contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            GenerationError::InvalidPartition { .. }
                | GenerationError::MalformedResponse(_)
                | GenerationError::UnexpectedShape(_)
                | GenerationError::InvalidRecord { .. }
                | GenerationError::DuplicateImageNumber(_)
                | GenerationError::IncompleteResult { .. }
        )
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        GenerationError::Transport(e.to_string())
    }
}

/// Errors surfaced at the service boundary.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_error",
            ServiceError::Configuration(_) => "configuration_error",
            ServiceError::Generation(e) => e.kind(),
        }
    }

    /// Message that is safe to return to a client in any environment.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(msg) | ServiceError::Configuration(msg) => msg.clone(),
            ServiceError::Generation(GenerationError::Timeout(_)) => {
                "Request timed out. Please try again.".to_string()
            }
            ServiceError::Generation(e @ GenerationError::Refused(_)) => e.to_string(),
            ServiceError::Generation(GenerationError::Provider { message, .. }) => message.clone(),
            ServiceError::Generation(GenerationError::Transport(_)) => {
                "Failed to reach the text generation provider".to_string()
            }
            ServiceError::Generation(_) => "Failed to generate prompts".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
