use std::sync::Arc;

use dialer::core::action::{Action, Effect, update};
use dialer::core::state::{
    App, CALL_FAILED_MESSAGE, CALL_PLACED_MESSAGE, CallStatus, NETWORK_ERROR_MESSAGE,
};
use dialer::effects;
use dialer::voice::{CallProvider, CallRequest, CallState, ProviderError, Speaker, VapiProvider};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn provider_for(server: &MockServer) -> VapiProvider {
    VapiProvider::new(
        "test-key".to_string(),
        server.uri(),
        "asst_123".to_string(),
        "pn_456".to_string(),
    )
}

fn app_for(provider: VapiProvider) -> App {
    App::new(Arc::new(provider), "asst_123".to_string())
}

/// Submit through the reducer and run the resulting effect like the TUI does.
async fn submit(app: &mut App, raw: &str) -> Effect {
    let (request_id, number) = match update(app, Action::Submit(raw.to_string())) {
        Effect::PlaceCall { request_id, number } => (request_id, number),
        other => return other,
    };
    let action = effects::place_call(app.provider.as_ref(), request_id, &number).await;
    update(app, action)
}

// ============================================================================
// Call creation
// ============================================================================

#[tokio::test]
async fn test_create_call_sends_expected_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/call"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_json(json!({
            "assistantId": "asst_123",
            "phoneNumberId": "pn_456",
            "customer": { "number": "+919876543210" }
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": "call_1", "status": "queued"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let created = provider
        .create_call(CallRequest {
            customer_number: "+919876543210",
        })
        .await
        .unwrap();

    assert_eq!(created.id.as_deref(), Some("call_1"));
    assert_eq!(created.status, Some(CallState::Queued));
}

#[tokio::test]
async fn test_successful_submission_clears_input_and_sets_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/call"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "call_1"})))
        .mount(&mock_server)
        .await;

    let mut app = app_for(provider_for(&mock_server));
    let effect = submit(&mut app, "98765 43210").await;

    assert_eq!(effect, Effect::ClearInput);
    assert_eq!(app.status, CallStatus::Success(CALL_PLACED_MESSAGE.to_string()));
    assert!(app.in_flight.is_none());
}

#[tokio::test]
async fn test_success_with_unexpected_body_is_still_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/call"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let mut app = app_for(provider_for(&mock_server));
    assert_eq!(submit(&mut app, "9876543210").await, Effect::ClearInput);
    assert_eq!(app.status, CallStatus::Success(CALL_PLACED_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_rejection_uses_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/call"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "busy"})))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let result = provider
        .create_call(CallRequest {
            customer_number: "+919876543210",
        })
        .await;
    assert_eq!(
        result,
        Err(ProviderError::Api {
            status: 400,
            message: Some("busy".to_string()),
        })
    );

    let mut app = app_for(provider);
    let effect = submit(&mut app, "9876543210").await;
    assert_eq!(effect, Effect::None);
    assert_eq!(app.status, CallStatus::Error("busy".to_string()));
}

#[tokio::test]
async fn test_rejection_with_message_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/call"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": ["customer.number must be a valid phone number", "assistantId is required"]
        })))
        .mount(&mock_server)
        .await;

    let mut app = app_for(provider_for(&mock_server));
    submit(&mut app, "9876543210").await;
    assert_eq!(
        app.status,
        CallStatus::Error(
            "customer.number must be a valid phone number; assistantId is required".to_string()
        )
    );
}

#[tokio::test]
async fn test_rejection_without_message_uses_generic_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/call"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let mut app = app_for(provider_for(&mock_server));
    submit(&mut app, "9876543210").await;
    assert_eq!(app.status, CallStatus::Error(CALL_FAILED_MESSAGE.to_string()));
}

#[tokio::test]
async fn test_invalid_number_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut app = app_for(provider_for(&mock_server));
    assert_eq!(submit(&mut app, "98765").await, Effect::None);
    assert!(matches!(app.status, CallStatus::Error(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then drop a listener so nothing answers on the port
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{port}");
    let provider = VapiProvider::new(
        "test-key".to_string(),
        uri,
        "asst_123".to_string(),
        "pn_456".to_string(),
    );

    let result = provider
        .create_call(CallRequest {
            customer_number: "+919876543210",
        })
        .await;
    assert!(matches!(result, Err(ProviderError::Network(_))));

    let mut app = app_for(provider);
    submit(&mut app, "9876543210").await;
    assert_eq!(app.status, CallStatus::Error(NETWORK_ERROR_MESSAGE.to_string()));
}

// ============================================================================
// Call history
// ============================================================================

#[tokio::test]
async fn test_list_calls_parses_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/call"))
        .and(query_param("limit", "5"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "call_1",
                "status": "ended",
                "type": "outboundPhoneCall",
                "customer": { "number": "+919876543210" },
                "startedAt": "2026-10-18T11:55:00Z",
                "endedReason": "customer-ended-call",
                "transcript": [
                    { "role": "assistant", "text": "Hello!" },
                    { "role": "customer", "text": "Hi" }
                ],
                "recordingUrl": "https://rec.example/call_1.wav"
            },
            { "id": "call_2", "status": "queued" }
        ])))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    let calls = provider.list_calls(5).await.unwrap();

    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].call_id, "call_1");
    assert_eq!(calls[0].status, CallState::Other("ended".to_string()));
    assert_eq!(calls[0].customer_number(), Some("+919876543210"));
    assert_eq!(calls[0].transcript[0].role, Speaker::Assistant);
    assert!(calls[0].started().is_some());
    assert_eq!(calls[1].status, CallState::Queued);
    assert!(calls[1].customer_number().is_none());
}

#[tokio::test]
async fn test_list_calls_tolerates_null_transcript_and_unknown_role() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "ok", "status": "completed" },
            { "id": "in_flight", "status": "ringing", "transcript": null },
            {
                "id": "with_prompt",
                "status": "completed",
                "transcript": [{ "role": "system", "text": "Be brief." }]
            }
        ])))
        .mount(&mock_server)
        .await;

    let calls = provider_for(&mock_server).list_calls(20).await.unwrap();

    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].call_id, "in_flight");
    assert!(calls[1].transcript.is_empty());
    assert_eq!(
        calls[2].transcript[0].role,
        Speaker::Other("system".to_string())
    );
}

#[tokio::test]
async fn test_history_fetch_feeds_reducer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/call"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": "call_9", "status": "completed" }])),
        )
        .mount(&mock_server)
        .await;

    let mut app = app_for(provider_for(&mock_server));
    assert_eq!(update(&mut app, Action::RefreshHistory), Effect::FetchHistory);

    let action = effects::fetch_history(app.provider.as_ref(), app.history_limit).await;
    update(&mut app, action);

    assert!(!app.history_loading);
    assert_eq!(app.calls.len(), 1);
    assert_eq!(app.calls[0].call_id, "call_9");
}

#[tokio::test]
async fn test_list_calls_bad_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/call"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    assert!(matches!(
        provider.list_calls(20).await,
        Err(ProviderError::Parse(_))
    ));
}

#[tokio::test]
async fn test_list_calls_unauthorized_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/call"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid Key"})),
        )
        .mount(&mock_server)
        .await;

    let provider = provider_for(&mock_server);
    assert_eq!(
        provider.list_calls(20).await,
        Err(ProviderError::Api {
            status: 401,
            message: Some("Invalid Key".to_string()),
        })
    );
}
