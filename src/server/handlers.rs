use crate::{
    error::{Result, ServiceError},
    models::{ImagePromptRecord, VisionRequest},
    server::{AppState, MAX_BODY_BYTES},
};
use actix_web::{
    http::{header, Method, StatusCode},
    web, HttpRequest, HttpResponse, HttpResponseBuilder, ResponseError,
};
use futures::StreamExt;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<ErrorDetails>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetails {
    kind: &'static str,
    message: String,
    request_id: String,
}

/// `POST /api/generate`: turns one vision into the full board of prompts.
pub async fn generate(state: web::Data<AppState>, payload: web::Payload) -> HttpResponse {
    let request_id = Uuid::new_v4();
    log::info!("[{}] 📨 Generation request received", request_id);

    let result = match read_body(payload).await {
        Ok(body) => generate_board(&state, &body, request_id).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(board) => {
            log::info!("[{}] ✅ Returning {} prompts", request_id, board.len());
            response(StatusCode::OK, &state).json(board)
        }
        Err(e) => error_response(&e, &state, request_id),
    }
}

/// Collects the request body, refusing anything over `MAX_BODY_BYTES`.
async fn read_body(mut payload: web::Payload) -> Result<web::BytesMut> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|_| ServiceError::Validation("Invalid request body".to_string()))?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(ServiceError::Validation("Request body too large".to_string()));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

async fn generate_board(
    state: &AppState,
    body: &[u8],
    request_id: Uuid,
) -> Result<Vec<ImagePromptRecord>> {
    let request: VisionRequest = serde_json::from_slice(body)
        .map_err(|_| ServiceError::Validation("Invalid JSON body".to_string()))?;
    let vision = request
        .vision()
        .ok_or_else(|| ServiceError::Validation("Prompt is required".to_string()))?;
    let orchestrator = state.orchestrator.as_ref().map_err(|e| e.clone())?;

    log::debug!("[{}] Vision has {} characters", request_id, vision.chars().count());
    Ok(orchestrator.generate_board(vision).await?)
}

/// Answers every non-POST method on the generation route.
pub async fn method_not_allowed(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if state.enable_cors && req.method() == Method::OPTIONS {
        return response(StatusCode::NO_CONTENT, &state)
            .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
            .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
            .finish();
    }

    log::debug!("Rejected {} {}", req.method(), req.path());
    response(StatusCode::METHOD_NOT_ALLOWED, &state)
        .insert_header((header::ALLOW, "POST"))
        .json(ErrorBody {
            error: "Method not allowed".to_string(),
            details: None,
        })
}

fn response(status: StatusCode, state: &AppState) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    builder.insert_header((header::CACHE_CONTROL, "no-store"));
    if state.enable_cors {
        builder.insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"));
    }
    builder
}

fn error_response(err: &ServiceError, state: &AppState, request_id: Uuid) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        log::error!("[{}] ❌ {} ({}): {}", request_id, status.as_u16(), err.kind(), err);
    } else {
        log::warn!("[{}] ⚠️  {} ({}): {}", request_id, status.as_u16(), err.kind(), err);
    }

    let details = (!state.environment.is_production()).then(|| ErrorDetails {
        kind: err.kind(),
        message: err.to_string(),
        request_id: request_id.to_string(),
    });

    response(status, state).json(ErrorBody {
        error: err.public_message(),
        details,
    })
}
