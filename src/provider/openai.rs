use crate::{
    config::ProviderConfig,
    error::{GenerationError, ServiceError},
    models::{
        chat::{
            ApiErrorEnvelope, ChatCompletionRequest, ChatCompletionResponse, ChatMessage,
            JsonSchemaFormat, ResponseFormat,
        },
        Completion, CompletionRequest,
    },
    provider::CompletionProvider,
};
use async_trait::async_trait;
use reqwest::Client;

#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiProvider {
    /// Fails with a configuration error when no credential is configured.
    pub fn new(config: &ProviderConfig) -> Result<Self, ServiceError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ServiceError::Configuration("OpenAI API key not configured".into()))?;

        let client = Client::builder()
            .build()
            .map_err(|e| ServiceError::Configuration(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_payload(request: &CompletionRequest) -> ChatCompletionRequest {
        let response_format = request.output_schema.as_ref().map(|schema| ResponseFormat {
            format_type: "json_schema".to_string(),
            json_schema: JsonSchemaFormat {
                name: schema.name.clone(),
                description: schema.description.clone(),
                schema: schema.schema.clone(),
                strict: true,
            },
        });

        ChatCompletionRequest {
            model: request.model.clone(),
            messages: vec![
                ChatMessage::system(request.system_prompt.clone()),
                ChatMessage::user(request.user_prompt.clone()),
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format,
        }
    }

    fn provider_error(status: reqwest::StatusCode, body: &str) -> GenerationError {
        let message = serde_json::from_str::<ApiErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| format!("OpenAI API error: {}", status));

        GenerationError::Provider {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError> {
        let payload = Self::build_payload(request);
        log::debug!(
            "Chat completion request: model={}, messages={}, schema={}",
            payload.model,
            payload.messages.len(),
            payload
                .response_format
                .as_ref()
                .map_or("none", |format| format.json_schema.name.as_str())
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("OpenAI API error: status={}, body={}", status, body);
            return Err(Self::provider_error(status, &body));
        }

        let body = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            log::error!("Unreadable chat completion envelope: {}", body);
            GenerationError::MalformedResponse(format!("invalid response envelope: {}", e))
        })?;

        let choice = parsed.choices.into_iter().next().ok_or_else(|| {
            GenerationError::MalformedResponse("response contained no choices".into())
        })?;

        Ok(Completion {
            content: choice.message.content,
            refusal: choice.message.refusal,
            finish_reason: choice.finish_reason,
        })
    }
}
