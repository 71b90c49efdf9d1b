// Wire tests for the Ollama generator

use sahay::config::OllamaConfig;
use sahay::generator::{ChatTurn, GeneratorError, OllamaGenerator, TextGenerator};

fn config_for(server: &mockito::ServerGuard) -> OllamaConfig {
    OllamaConfig {
        base_url: server.url(),
        ..OllamaConfig::default()
    }
}

#[tokio::test]
async fn generate_returns_message_content() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/api/chat")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": {"role": "assistant", "content": "mocked reply"}, "done": true}"#)
        .create_async()
        .await;

    let generator = OllamaGenerator::new(&config_for(&server)).unwrap();
    let context = vec![ChatTurn::user("earlier"), ChatTurn::assistant("reply")];

    let text = generator
        .generate("system prompt", &context, "current message")
        .await
        .unwrap();

    assert_eq!(text, "mocked reply");
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_surfaces_as_status_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/api/chat")
        .with_status(500)
        .with_body("model not loaded")
        .create_async()
        .await;

    let generator = OllamaGenerator::new(&config_for(&server)).unwrap();
    let err = generator
        .generate("system prompt", &[], "message")
        .await
        .unwrap_err();

    match err {
        GeneratorError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("model not loaded"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_surfaces_as_decode_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let generator = OllamaGenerator::new(&config_for(&server)).unwrap();
    let err = generator
        .generate("system prompt", &[], "message")
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::Decode(_)));
}
