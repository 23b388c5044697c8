pub mod config;
pub mod error;
pub mod generation;
pub mod logger;
pub mod models;
pub mod provider;
#[cfg(feature = "server")]
pub mod server;

pub use config::{Config, Environment, ProviderConfig};
pub use error::{GenerationError, Result, ServiceError};
pub use generation::{GenerationSettings, PromptGenerator, PromptOrchestrator};
pub use models::{
    partition, Completion, CompletionRequest, GenerationRange, ImagePromptRecord, ImageRatio,
    VisionRequest,
};
pub use provider::{CompletionProvider, OpenAiProvider};
