pub mod openai;

use crate::{
    error::GenerationError,
    models::{Completion, CompletionRequest},
};
use async_trait::async_trait;

pub use openai::OpenAiProvider;

/// A text generation backend able to honor a declared output schema.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError>;
}
