mod common;

use actix_web::{http::StatusCode, test, web, App};
use common::{assigned_range, board_payload, StubProvider};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use visionboard::{
    models::category::expected_ratio,
    server::{configure, AppState, GENERATE_PATH},
    Config, GenerationSettings, ImagePromptRecord, PromptGenerator, PromptOrchestrator,
    ProviderConfig,
};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, Request, Respond, ResponseTemplate,
};

fn generate_request(prompt: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(GENERATE_PATH)
        .set_json(json!({ "prompt": prompt }))
}

fn assert_complete_board(board: &[ImagePromptRecord]) {
    assert_eq!(board.len(), 49);
    assert_eq!(board.first().unwrap().image_number, 1);
    assert_eq!(board.last().unwrap().image_number, 49);
    for (index, record) in board.iter().enumerate() {
        assert_eq!(record.image_number, index as u32 + 1);
        assert_eq!(Some(record.image_ratio), expected_ratio(record.image_number));
    }
}

#[actix_web::test]
async fn test_generate_returns_the_full_board() {
    let provider = Arc::new(StubProvider::default());
    let state = AppState::with_provider(provider.clone(), &Config::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(&app, generate_request("A slow morning in a sunlit kitchen").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let board: Vec<ImagePromptRecord> = test::read_body_json(resp).await;
    assert_complete_board(&board);
    assert_eq!(provider.calls(), 2);
}

#[actix_web::test]
async fn test_whitespace_prompt_never_reaches_the_provider() {
    let provider = Arc::new(StubProvider::default());
    let state = AppState::with_provider(provider.clone(), &Config::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(&app, generate_request(" \n\t ").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Prompt is required");
    assert_eq!(provider.calls(), 0);
}

#[actix_web::test]
async fn test_stalled_range_times_out_without_waiting_for_it() {
    let provider = Arc::new(StubProvider::stalling(25));
    let settings = GenerationSettings::default().with_timeout(Duration::from_millis(200));
    let orchestrator = PromptOrchestrator::new(PromptGenerator::new(provider, settings));
    let state = AppState::with_orchestrator(orchestrator, &Config::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;

    let started = Instant::now();
    let resp = test::call_service(&app, generate_request("Mountain cabin retreat").to_request()).await;
    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    assert!(started.elapsed() < Duration::from_secs(10));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Request timed out. Please try again.");
    assert_eq!(body["details"]["kind"], "timeout");
}

#[actix_web::test]
async fn test_missing_credential_answers_500() {
    let state = AppState::from_config(&Config::default().with_provider(ProviderConfig::default()));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(&app, generate_request("Ocean swim at dawn").to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "OpenAI API key not configured");
}

#[actix_web::test]
async fn test_get_is_not_allowed() {
    let state = AppState::with_provider(Arc::new(StubProvider::default()), &Config::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri(GENERATE_PATH).to_request()).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

/// Plays a chat completions endpoint that answers each range it is asked for.
struct RangeAwareCompletions;

impl Respond for RangeAwareCompletions {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400),
        };
        let system = body["messages"][0]["content"].as_str().unwrap_or_default();
        match assigned_range(system) {
            Some(range) => ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": board_payload(range).to_string(),
                        "refusal": null
                    },
                    "finish_reason": "stop"
                }]
            })),
            None => ResponseTemplate::new(400),
        }
    }
}

#[actix_web::test]
async fn test_openai_provider_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(RangeAwareCompletions)
        .expect(2)
        .mount(&server)
        .await;

    let config = Config::default().with_provider(
        ProviderConfig::default()
            .with_api_key("sk-test")
            .with_base_url(server.uri()),
    );
    let state = AppState::from_config(&config);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(configure),
    )
    .await;

    let resp = test::call_service(&app, generate_request("Weekend market with friends").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let board: Vec<ImagePromptRecord> = test::read_body_json(resp).await;
    assert_complete_board(&board);

    let requests = server.received_requests().await.unwrap();
    for request in &requests {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["messages"][1]["content"], "Weekend market with friends");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }
}
