//! Shape and round-trip tests for the built-in records.

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::codec::{JsonKind, PathSegment};

#[fixture]
fn chat_request() -> ChatRequest {
    ChatRequest {
        provider: String::from("OpenAI"),
        llm: String::from("gpt-4"),
        api_key: String::from("sk-test"),
        prompt: vec![
            ChatMessage::new("You are ZAMM, a chat program.", "System"),
            ChatMessage::new("Hello, does this work?", "Human"),
        ],
        temperature: Some(0.3),
    }
}

#[fixture]
fn chat_response() -> ChatResponse {
    ChatResponse {
        llm: Some(String::from("gpt-4-0613")),
        response: ChatMessage::new("Yes, it works.", "AI"),
        tokens: TokenMetadata {
            completion: 5,
            prompt: 32,
            total: 37,
            cost: 0.00126,
        },
    }
}

fn round_trip<T: Schema>(value: &T) -> T {
    let encoded = value.encode().expect("encode");
    T::decode(&encoded).expect("decode")
}

#[test]
fn greet_request_round_trips() {
    let request = GreetRequest {
        name: String::from("World"),
    };
    assert_eq!(round_trip(&request), request);
}

#[test]
fn greet_response_encodes_single_field() {
    let response = GreetResponse {
        greeting: String::from("Hello, World!"),
    };
    assert_eq!(
        response.encode().expect("encode"),
        json!({ "greeting": "Hello, World!" })
    );
}

#[rstest]
fn chat_request_round_trips(chat_request: ChatRequest) {
    assert_eq!(round_trip(&chat_request), chat_request);
}

#[rstest]
fn chat_response_round_trips(chat_response: ChatResponse) {
    assert_eq!(round_trip(&chat_response), chat_response);
}

#[rstest]
fn absent_temperature_is_omitted_not_null(mut chat_request: ChatRequest) {
    chat_request.temperature = None;
    let encoded = chat_request.encode().expect("encode");
    let Value::Object(fields) = &encoded else {
        panic!("expected object, got {encoded}");
    };
    assert!(!fields.contains_key("temperature"));
    assert_eq!(round_trip(&chat_request).temperature, None);
}

#[rstest]
#[case::missing(json!({
    "provider": "OpenAI",
    "llm": "gpt-4",
    "api_key": "sk-test",
    "prompt": [{ "message": "Hi", "role": "Human" }]
}))]
#[case::null(json!({
    "provider": "OpenAI",
    "llm": "gpt-4",
    "api_key": "sk-test",
    "prompt": [{ "message": "Hi", "role": "Human" }],
    "temperature": null
}))]
fn chat_request_without_temperature_decodes(#[case] raw: Value) {
    let request = ChatRequest::decode(&raw).expect("decode");
    assert_eq!(request.temperature, None);
    assert_eq!(request.prompt, vec![ChatMessage::new("Hi", "Human")]);

    let encoded = request.encode().expect("encode");
    assert_eq!(encoded.get("temperature"), None);
}

#[test]
fn integral_temperature_widens_to_float() {
    let raw = json!({
        "provider": "OpenAI",
        "llm": "gpt-4",
        "api_key": "",
        "prompt": [],
        "temperature": 1
    });
    let request = ChatRequest::decode(&raw).expect("decode");
    assert_eq!(request.temperature, Some(1.0));
}

#[test]
fn nested_failures_report_full_path() {
    let raw = json!({
        "provider": "OpenAI",
        "llm": "gpt-4",
        "api_key": "sk-test",
        "prompt": [
            { "message": "Hi", "role": "Human" },
            { "message": "Hello" }
        ]
    });
    let error = ChatRequest::decode(&raw).expect_err("second message lacks a role");
    assert_eq!(
        error.path().segments(),
        &[
            PathSegment::Field("prompt"),
            PathSegment::Index(1),
            PathSegment::Field("role"),
        ]
    );
    assert_eq!(error.found(), JsonKind::Missing);
    assert_eq!(error.path().to_string(), "prompt[1].role");
}

#[test]
fn first_invalid_field_in_declaration_order_is_reported() {
    let raw = json!({ "provider": 1, "llm": 2 });
    let error = ChatRequest::decode(&raw).expect_err("both fields invalid");
    assert_eq!(error.path().segments(), &[PathSegment::Field("provider")]);
}

#[test]
fn boolean_token_counts_are_rejected() {
    let raw = json!({
        "response": { "message": "ok", "role": "AI" },
        "tokens": { "completion": true, "prompt": 1, "total": 2, "cost": 0.0 }
    });
    let error = ChatResponse::decode(&raw).expect_err("boolean count");
    assert_eq!(error.path().to_string(), "tokens.completion");
    assert_eq!(error.found(), JsonKind::Boolean);
}

#[rstest]
fn responses_without_llm_still_decode(chat_response: ChatResponse) {
    let mut encoded = chat_response.encode().expect("encode");
    if let Value::Object(fields) = &mut encoded {
        fields.remove("llm");
    }
    let decoded = ChatResponse::decode(&encoded).expect("decode older payload");
    assert_eq!(decoded.llm, None);
    assert_eq!(decoded.tokens, chat_response.tokens);
}

#[rstest]
fn absent_llm_is_omitted(mut chat_response: ChatResponse) {
    chat_response.llm = None;
    let encoded = chat_response.encode().expect("encode");
    assert_eq!(
        encoded,
        json!({
            "response": { "message": "Yes, it works.", "role": "AI" },
            "tokens": { "completion": 5, "prompt": 32, "total": 37, "cost": 0.00126 }
        })
    );
}
