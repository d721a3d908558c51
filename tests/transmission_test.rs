use httpmock::prelude::*;
use retro_chronos::core::TransmissionFetcher;
use retro_chronos::utils::error::ChronosError;
use retro_chronos::{GeminiFetcher, TomlConfig, TransmissionResult, Tuner};
use serde_json::json;

const PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

fn fetcher(server: &MockServer, api_key: Option<&str>) -> GeminiFetcher {
    GeminiFetcher::new(
        &server.base_url(),
        "gemini-2.5-flash",
        api_key.map(str::to_string),
    )
}

#[tokio::test]
async fn test_successful_transmission() {
    let server = MockServer::start();

    let transmission = json!({
        "message": "Rain of neon over Olympus Mons. Carry an umbrella.",
        "frequency": "104.5 FM - Neo Tokyo",
        "timestamp": "2184-07-04T13:05"
    });

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(PATH)
            .header("x-goog-api-key", "test-key")
            .body_contains("The current time is 01:05 PM.")
            .body_contains("\"responseMimeType\":\"application/json\"")
            .body_contains("\"required\":[\"message\",\"frequency\",\"timestamp\"]");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(gemini_reply(&transmission.to_string()));
    });

    let result = fetcher(&server, Some("test-key"))
        .request_transmission("01:05 PM")
        .await;

    api_mock.assert();
    assert_eq!(result.message, "Rain of neon over Olympus Mons. Carry an umbrella.");
    assert_eq!(result.frequency, "104.5 FM - Neo Tokyo");
    assert_eq!(result.timestamp, "2184-07-04T13:05");
    assert!(!result.is_signal_lost());
}

#[tokio::test]
async fn test_server_error_resolves_to_sentinel() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(500).body("upstream exploded");
    });

    let fetcher = fetcher(&server, Some("test-key"));
    let result = fetcher.request_transmission("13:05").await;

    api_mock.assert();
    assert_eq!(
        result,
        TransmissionResult {
            message: "SIGNAL LOST. STATIC INTERFERENCE DETECTED.".to_string(),
            frequency: "ERR-404".to_string(),
            timestamp: "UNKNOWN".to_string(),
        }
    );

    match fetcher.try_request("13:05").await {
        Err(ChronosError::ApiStatusError { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_field_resolves_to_sentinel() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(200)
            .json_body(gemini_reply(r#"{"message": "hello", "frequency": "AM 530"}"#));
    });

    let result = fetcher(&server, Some("test-key"))
        .request_transmission("13:05")
        .await;

    api_mock.assert();
    assert!(result.is_signal_lost());
}

#[tokio::test]
async fn test_malformed_text_resolves_to_sentinel() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(200).json_body(gemini_reply("static... crackle... {"));
    });

    let fetcher = fetcher(&server, Some("test-key"));
    assert!(fetcher.request_transmission("13:05").await.is_signal_lost());
    assert!(matches!(
        fetcher.try_request("13:05").await,
        Err(ChronosError::SerializationError(_))
    ));
}

#[tokio::test]
async fn test_empty_candidates_is_no_signal() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(200).json_body(json!({ "candidates": [] }));
    });

    let fetcher = fetcher(&server, Some("test-key"));
    assert!(matches!(
        fetcher.try_request("13:05").await,
        Err(ChronosError::EmptyResponseError)
    ));
    assert!(fetcher.request_transmission("13:05").await.is_signal_lost());
}

#[tokio::test]
async fn test_missing_api_key_never_hits_the_network() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(200).json_body(gemini_reply("{}"));
    });

    let result = fetcher(&server, None).request_transmission("13:05").await;

    assert!(result.is_signal_lost());
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_unreachable_endpoint_resolves_to_sentinel() {
    // 保留埠號，不會有服務在聽
    let fetcher = GeminiFetcher::new("http://127.0.0.1:9", "gemini-2.5-flash", Some("k".into()));
    assert!(fetcher.request_transmission("13:05").await.is_signal_lost());
}

#[tokio::test]
async fn test_fetcher_from_toml_config() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-custom:generateContent")
            .header("x-goog-api-key", "file-key");
        then.status(200).json_body(gemini_reply(
            r#"{"message": "Subspace is calm.", "frequency": "Subspace Channel 7", "timestamp": "NOW"}"#,
        ));
    });

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[transmission]
endpoint = "{}"
model = "gemini-custom"
api_key = "file-key"
timeout_seconds = 5
"#,
        server.base_url()
    ))
    .unwrap();

    let fetcher = GeminiFetcher::from_config(&config).unwrap();
    let result = fetcher.request_transmission("13:05").await;

    api_mock.assert();
    assert_eq!(result.frequency, "Subspace Channel 7");
}

#[tokio::test]
async fn test_tuner_over_gemini_fetcher() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST).path(PATH);
        then.status(200).json_body(gemini_reply(
            r#"{"message": "Flying car traffic is light.", "frequency": "88.1 FM", "timestamp": "2099"}"#,
        ));
    });

    let tuner = Tuner::new(fetcher(&server, Some("test-key")));
    let handle = tuner.tune_in("01:05 PM".to_string()).unwrap();
    let result = handle.await.unwrap();

    api_mock.assert();
    assert_eq!(result.frequency, "88.1 FM");
    assert!(!tuner.is_busy());
}
