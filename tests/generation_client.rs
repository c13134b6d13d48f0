//! HTTP generation client against a mock service

use resume_builder::config::GenerationConfig;
use resume_builder::llm::{GenerationService, HttpGenerationClient};
use resume_builder::ResumeBuilderError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

fn config_for(endpoint: String) -> GenerationConfig {
    GenerationConfig {
        endpoint,
        timeout_secs: 5,
        max_retries: 1,
        retry_backoff_ms: 10,
        api_key_env: None,
    }
}

#[tokio::test]
async fn test_successful_generation() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chatgpt")
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::Json(serde_json::json!({ "prompt": "Create a resume" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result": "Jane Doe\nLogistics Manager"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = HttpGenerationClient::new(&config_for(format!("{}/api/chatgpt", server.url())), None).unwrap();
    let draft = client.generate("Create a resume").await.unwrap();

    assert_eq!(draft, "Jane Doe\nLogistics Manager");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_multibyte_result_is_returned_whole() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body(r#"{"result": "José Müller, Gerente de Logística ✓"}"#)
        .create_async()
        .await;

    let client = HttpGenerationClient::new(&config_for(format!("{}/generate", server.url())), None).unwrap();
    let draft = client.generate("p").await.unwrap();

    assert_eq!(draft, "José Müller, Gerente de Logística ✓");
    assert_eq!(draft.chars().count(), 35);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_body(r#"{"result": "ok"}"#)
        .create_async()
        .await;

    let client = HttpGenerationClient::new(
        &config_for(format!("{}/generate", server.url())),
        Some("secret-token".to_string()),
    )
    .unwrap();

    assert_eq!(client.generate("p").await.unwrap(), "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_retries_once_after_server_error() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("POST", "/generate")
        .with_status(503)
        .with_body("overloaded")
        .expect(1)
        .create_async()
        .await;
    let succeeding = server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body(r#"{"result": "second time lucky"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = HttpGenerationClient::new(&config_for(format!("{}/generate", server.url())), None).unwrap();
    let draft = client.generate("p").await.unwrap();

    assert_eq!(draft, "second time lucky");
    failing.assert_async().await;
    succeeding.assert_async().await;
}

#[tokio::test]
async fn test_gives_up_after_single_retry() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .with_status(500)
        .expect(2)
        .create_async()
        .await;

    let client = HttpGenerationClient::new(&config_for(format!("{}/generate", server.url())), None).unwrap();
    let result = client.generate("p").await;

    assert!(matches!(result, Err(ResumeBuilderError::GenerationFailed(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .with_status(400)
        .with_body("bad prompt")
        .expect(1)
        .create_async()
        .await;

    let client = HttpGenerationClient::new(&config_for(format!("{}/generate", server.url())), None).unwrap();
    let result = client.generate("p").await;

    match result {
        Err(ResumeBuilderError::GenerationFailed(message)) => assert!(message.contains("bad prompt")),
        other => panic!("expected GenerationFailed, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_response_fails() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body(r#"{"text": "wrong field"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = HttpGenerationClient::new(&config_for(format!("{}/generate", server.url())), None).unwrap();
    let result = client.generate("p").await;

    match result {
        Err(ResumeBuilderError::GenerationFailed(message)) => assert!(message.contains("Malformed")),
        other => panic!("expected GenerationFailed, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_service_fails() {
    // Nothing listens on port 1
    let client = HttpGenerationClient::new(&config_for("http://127.0.0.1:1/generate".to_string()), None).unwrap();
    let result = client.generate("p").await;
    assert!(matches!(result, Err(ResumeBuilderError::GenerationFailed(_))));
}

#[tokio::test]
async fn test_silent_service_times_out_and_is_retried() {
    // Accepts connections and never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            held.push(socket);
        }
    });

    let mut config = config_for(format!("http://{}/generate", address));
    config.timeout_secs = 1;
    let client = HttpGenerationClient::new(&config, None).unwrap();

    let started = std::time::Instant::now();
    let result = client.generate("p").await;

    match result {
        Err(ResumeBuilderError::GenerationFailed(message)) => assert!(message.contains("timed out"), "{}", message),
        other => panic!("expected GenerationFailed, got {:?}", other),
    }
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
    assert!(started.elapsed() >= std::time::Duration::from_secs(2));
}
