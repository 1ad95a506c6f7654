// Generative collaborator against mocked OpenAI-compatible endpoints

use mindcare::config::GeneratorConfig;
use mindcare::providers::{
    FallbackChain, GenerationRequest, OpenAiCompatibleGenerator, ReplyGenerator,
};
use mindcare::triage::{templates, Category, ReplySource, Session, Turn, TriageEngine};
use mockito::Matcher;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

fn completion(text: &str) -> String {
    json!({
        "choices": [{
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn generator_for(server: &mockito::ServerGuard) -> OpenAiCompatibleGenerator {
    OpenAiCompatibleGenerator::new_custom(
        server.url(),
        "test-model".to_string(),
        &GeneratorConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_generate_sends_history_and_sampling() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "test-model",
            "max_tokens": 150,
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("That sounds exhausting."))
        .create_async()
        .await;

    let generator = generator_for(&server).with_api_key("sk-test");
    let request = GenerationRequest::new(
        vec![Turn::user("hello"), Turn::assistant("Hi there!")],
        "work was long today",
    );

    let text = generator.generate(&request).await.unwrap();
    assert_eq!(text, "That sounds exhausting.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_body("overloaded")
        .create_async()
        .await;

    let generator = generator_for(&server);
    let err = generator
        .generate(&GenerationRequest::new(vec![], "hello there friend"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_engine_uses_generated_reply() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion("I'm glad you reached out. What's been weighing on you?"))
        .create_async()
        .await;

    let engine = TriageEngine::new().unwrap();
    let mut session = Session::new();
    let mut rng = StdRng::seed_from_u64(1);
    let generator = generator_for(&server);

    let outcome = engine
        .process_turn_with(&mut session, "can we talk for a bit", &generator, &mut rng)
        .await;

    assert_eq!(outcome.reply_source, ReplySource::Generated);
    assert_eq!(outcome.reply, "I'm glad you reached out. What's been weighing on you?");
    assert_eq!(session.transcript()[1].text, outcome.reply);
}

#[tokio::test]
async fn test_engine_falls_back_on_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .create_async()
        .await;

    let engine = TriageEngine::new().unwrap();
    let mut session = Session::new();
    let mut rng = StdRng::seed_from_u64(2);
    let generator = generator_for(&server);

    let outcome = engine
        .process_turn_with(&mut session, "I'm stressed and overwhelmed", &generator, &mut rng)
        .await;

    assert_eq!(outcome.reply_source, ReplySource::SafetyOverride(Category::Stress));
    assert!(templates::STRESS.contains(&outcome.reply.as_str()));
    assert!(outcome.generator_fallback);
}

#[tokio::test]
async fn test_engine_rejects_blank_generation() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion("  \n "))
        .create_async()
        .await;

    let engine = TriageEngine::new().unwrap();
    let mut session = Session::new();
    let mut rng = StdRng::seed_from_u64(3);
    let generator = generator_for(&server);

    let outcome = engine
        .process_turn_with(&mut session, "I feel so empty", &generator, &mut rng)
        .await;

    assert_eq!(outcome.reply_source, ReplySource::SafetyOverride(Category::Depression));
    assert!(!outcome.reply.trim().is_empty());
}

#[tokio::test]
async fn test_suicidal_turn_never_reaches_generator() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion("Let's change the subject."))
        .expect(0)
        .create_async()
        .await;

    let engine = TriageEngine::new().unwrap();
    let mut session = Session::new();
    let mut rng = StdRng::seed_from_u64(4);
    let generator = generator_for(&server);

    let outcome = engine
        .process_turn_with(&mut session, "I want to end my life", &generator, &mut rng)
        .await;

    assert_eq!(
        outcome.reply_source,
        ReplySource::SafetyOverride(Category::SuicidalIdeation)
    );
    assert!(templates::SUICIDAL_IDEATION.contains(&outcome.reply.as_str()));
    assert_eq!(outcome.crisis_banner, Some(templates::CRISIS_BANNER));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fallback_chain_over_http() {
    let mut primary = mockito::Server::new_async().await;
    let _down = primary
        .mock("POST", "/v1/chat/completions")
        .with_status(502)
        .create_async()
        .await;

    let mut secondary = mockito::Server::new_async().await;
    let _up = secondary
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(completion("I'm here with you."))
        .create_async()
        .await;

    let chain = FallbackChain::new(vec![
        Box::new(generator_for(&primary)),
        Box::new(generator_for(&secondary)),
    ]);

    let text = chain
        .generate(&GenerationRequest::new(vec![], "rough week"))
        .await
        .unwrap();
    assert_eq!(text, "I'm here with you.");
}
