pub mod handlers;

use crate::{
    config::{Config, Environment},
    error::{GenerationError, ServiceError},
    generation::{GenerationSettings, PromptGenerator, PromptOrchestrator},
    provider::{CompletionProvider, OpenAiProvider},
};
use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer, ResponseError};
use std::sync::Arc;

pub const GENERATE_PATH: &str = "/api/generate";

/// Largest request body the generation route reads.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared per-worker state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Holds the provider setup failure when the orchestrator could not be built.
    pub orchestrator: Result<PromptOrchestrator, ServiceError>,
    pub environment: Environment,
    pub enable_cors: bool,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let orchestrator = match OpenAiProvider::new(&config.provider) {
            Ok(provider) => {
                log::info!("✅ OpenAI provider initialized ({})", config.provider.model);
                Ok(Self::orchestrator_for(Arc::new(provider), config))
            }
            Err(e) => {
                log::warn!("⚠️  {}, generation requests will fail", e);
                Err(e)
            }
        };

        Self {
            orchestrator,
            environment: config.environment,
            enable_cors: config.enable_cors,
        }
    }

    pub fn with_provider(provider: Arc<dyn CompletionProvider>, config: &Config) -> Self {
        Self::with_orchestrator(Self::orchestrator_for(provider, config), config)
    }

    pub fn with_orchestrator(orchestrator: PromptOrchestrator, config: &Config) -> Self {
        Self {
            orchestrator: Ok(orchestrator),
            environment: config.environment,
            enable_cors: config.enable_cors,
        }
    }

    fn orchestrator_for(provider: Arc<dyn CompletionProvider>, config: &Config) -> PromptOrchestrator {
        let settings = GenerationSettings::from_config(&config.provider);
        PromptOrchestrator::new(PromptGenerator::new(provider, settings))
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Generation(GenerationError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::Generation(GenerationError::Refused(_)) => StatusCode::BAD_REQUEST,
            ServiceError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.public_message() }))
    }
}

/// Registers the generation route. Any method other than POST gets a 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(GENERATE_PATH)
            .route(web::post().to(handlers::generate))
            .default_service(web::route().to(handlers::method_not_allowed)),
    );
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let state = web::Data::new(AppState::from_config(&config));
    let bind_address = config.bind_address();

    log::info!("🌐 Binding HTTP server to {}", bind_address);
    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(bind_address)?
        .run()
        .await
}
