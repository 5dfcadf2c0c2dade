use mockito::{Matcher, Server};
use serde_json::json;

use ride_recommender::recommend::generator::{GenerationError, OpenAiGenerator, TextGenerator};
use ride_recommender::recommend::prompt::{ChatMessage, GenerationRequest};

fn request() -> GenerationRequest {
    GenerationRequest {
        model: "gpt-3.5-turbo".into(),
        messages: vec![
            ChatMessage::system("You are a friendly automotive reviewer."),
            ChatMessage::user("Write a friendly review of the 2024 Toyota Camry."),
        ],
        temperature: 0.7,
    }
}

#[test]
fn posts_chat_completion_and_returns_text() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo",
            "temperature": 0.7,
            "messages": [
                {"role": "system", "content": "You are a friendly automotive reviewer."},
                {"role": "user", "content": "Write a friendly review of the 2024 Toyota Camry."}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"  Hey there! The Camry...  "}}]}"#)
        .expect(1)
        .create();

    let generator = OpenAiGenerator::new(&server.url(), "sk-test").unwrap();
    let text = generator.generate(&request()).unwrap();

    assert_eq!(text, "  Hey there! The Camry...  ");
    mock.assert();
}

#[test]
fn trailing_slash_in_base_url_is_tolerated() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"content":"ok"}}]}"#)
        .create();

    let generator = OpenAiGenerator::new(&format!("{}/", server.url()), "sk-test").unwrap();
    assert_eq!(generator.generate(&request()).unwrap(), "ok");
    mock.assert();
}

#[test]
fn api_errors_carry_status_and_body() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create();

    let generator = OpenAiGenerator::new(&server.url(), "sk-wrong").unwrap();
    match generator.generate(&request()) {
        Err(GenerationError::Api { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Incorrect API key"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[test]
fn empty_choices_are_an_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create();

    let generator = OpenAiGenerator::new(&server.url(), "sk-test").unwrap();
    assert!(matches!(generator.generate(&request()), Err(GenerationError::EmptyResponse)));
}

#[test]
fn malformed_body_is_an_http_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("not json")
        .create();

    let generator = OpenAiGenerator::new(&server.url(), "sk-test").unwrap();
    assert!(matches!(generator.generate(&request()), Err(GenerationError::Http(_))));
}
