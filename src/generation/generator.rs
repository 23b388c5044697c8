use crate::{
    config::ProviderConfig,
    error::GenerationError,
    generation::{instructions::system_prompt, schema::prompts_schema, validate::validate_completion},
    logger,
    models::{CompletionRequest, GenerationRange, ImagePromptRecord},
    provider::CompletionProvider,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl GenerationSettings {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from_config(&ProviderConfig::default())
    }
}

/// Produces the validated prompts for a single range with one provider call.
#[derive(Clone)]
pub struct PromptGenerator {
    provider: Arc<dyn CompletionProvider>,
    settings: GenerationSettings,
}

impl PromptGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn build_request(&self, prompt: &str, range: GenerationRange, model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            system_prompt: system_prompt(range),
            user_prompt: prompt.to_string(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            output_schema: Some(prompts_schema()),
        }
    }

    pub async fn generate(
        &self,
        prompt: &str,
        range: GenerationRange,
        model: &str,
    ) -> Result<Vec<ImagePromptRecord>, GenerationError> {
        log::info!("🎯 Generating prompts {} with {}", range, model);
        let request = self.build_request(prompt, range, model);
        let _timer = logger::timer(&format!("{} request {}", self.provider.name(), range));

        let completion = tokio::time::timeout(self.settings.timeout, self.provider.complete(&request))
            .await
            .map_err(|_| {
                log::warn!("Range {} timed out after {:?}", range, self.settings.timeout);
                GenerationError::Timeout(self.settings.timeout)
            })??;

        match validate_completion(&completion, range) {
            Ok(records) => {
                log::debug!("Range {} produced {} valid prompts", range, records.len());
                Ok(records)
            }
            Err(e) => {
                if e.is_contract_violation() {
                    log::error!(
                        "Range {} rejected: {}. Raw content: {}",
                        range,
                        e,
                        completion.content.as_deref().unwrap_or("<none>")
                    );
                } else {
                    log::warn!("Range {} failed: {}", range, e);
                }
                Err(e)
            }
        }
    }
}
