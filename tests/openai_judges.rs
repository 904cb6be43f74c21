//! Judge request and response shapes against an OpenAI-compatible server

use std::sync::Arc;

use hadith_validator::domain::judge::{JudgePrompts, LabelJudge, ScoreJudge, VerdictJudge};
use hadith_validator::domain::llm::LlmRequest;
use hadith_validator::domain::{DomainError, LlmProvider, RelationshipLabel, VerdictTag, VerseCandidate};
use hadith_validator::infrastructure::judge::{
    JudgeModel, LlmLabelJudge, LlmScoreJudge, LlmVerdictJudge, StructuredOutput,
};
use hadith_validator::infrastructure::llm::{HttpClient, OpenAiProvider, ResilientLlmProvider};
use hadith_validator::infrastructure::resilience::{CallGuard, RetryPolicy};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CLAIM: &str = "Paradise lies at the feet of your mother";

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 8, "total_tokens": 128 }
    }))
}

fn model(server: &MockServer, structured_output: StructuredOutput) -> JudgeModel {
    let provider: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::with_base_url(
        HttpClient::new(),
        "sk-test",
        server.uri(),
    ));
    JudgeModel::new(provider, "gpt-3.5-turbo").with_structured_output(structured_output)
}

fn verse() -> VerseCandidate {
    VerseCandidate::new(
        0.88,
        "We have enjoined upon man goodness to parents",
        "Al-Ahqaf",
        15,
    )
}

#[tokio::test]
async fn score_judge_sends_rendered_prompt_and_parses_score() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-3.5-turbo", "temperature": 0.0 })))
        .and(body_string_contains("goodness to parents (Surah: Al-Ahqaf, Ayah: 15)"))
        .and(body_string_contains(CLAIM))
        .respond_with(completion("Score: 8"))
        .expect(1)
        .mount(&server)
        .await;

    let prompts = JudgePrompts::default().compile().unwrap();
    let judge = LlmScoreJudge::new(model(&server, StructuredOutput::JsonObject), prompts.relevance);

    assert_eq!(judge.score(CLAIM, &verse()).await.unwrap(), 8);
}

#[tokio::test]
async fn score_judge_rejects_out_of_range() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(completion("Score: 42"))
        .mount(&server)
        .await;

    let prompts = JudgePrompts::default().compile().unwrap();
    let judge = LlmScoreJudge::new(model(&server, StructuredOutput::JsonObject), prompts.relevance);

    let err = judge.score(CLAIM, &verse()).await.unwrap_err();
    assert!(matches!(err, DomainError::JudgeResponse { .. }));
}

#[tokio::test]
async fn label_judge_requests_json_mode() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({ "response_format": { "type": "json_object" } })))
        .respond_with(completion(r#"{"classification": "Supported"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let prompts = JudgePrompts::default().compile().unwrap();
    let judge = LlmLabelJudge::new(model(&server, StructuredOutput::JsonObject), prompts.relationship);

    assert_eq!(
        judge.classify(CLAIM, &verse()).await.unwrap(),
        RelationshipLabel::Supported
    );
}

#[tokio::test]
async fn label_judge_schema_mode_sends_strict_schema() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "response_format": { "type": "json_schema", "json_schema": { "strict": true } }
        })))
        .respond_with(completion(r#"{"classification": "Contradicted"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let prompts = JudgePrompts::default().compile().unwrap();
    let judge = LlmLabelJudge::new(model(&server, StructuredOutput::JsonSchema), prompts.relationship);

    assert_eq!(
        judge.classify(CLAIM, &verse()).await.unwrap(),
        RelationshipLabel::Contradicted
    );
}

#[tokio::test]
async fn verdict_judge_renders_evidence_and_parses_verdict() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Surah: Al-Ahqaf, Ayah: 15"))
        .respond_with(completion(
            r#"{"confidence": 0.82, "verdict": "Valid", "summary": "Honouring parents is enjoined."}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let prompts = JudgePrompts::default().compile().unwrap();
    let judge = LlmVerdictJudge::new(model(&server, StructuredOutput::JsonObject), prompts.verdict);

    let verdict = judge.judge(CLAIM, &[verse()], &[]).await.unwrap();

    assert_eq!(verdict.verdict, VerdictTag::Valid);
    assert!((verdict.confidence - 0.82).abs() < f64::EPSILON);
    assert_eq!(verdict.summary, "Honouring parents is enjoined.");
}

#[tokio::test]
async fn unauthorized_is_a_configuration_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let prompts = JudgePrompts::default().compile().unwrap();
    let judge = LlmVerdictJudge::new(model(&server, StructuredOutput::JsonObject), prompts.verdict);

    let err = judge.judge(CLAIM, &[], &[]).await.unwrap_err();
    assert!(matches!(err, DomainError::Configuration { .. }));
}

#[tokio::test]
async fn undecodable_success_body_is_sent_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>captive portal</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let inner: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::with_base_url(
        HttpClient::new(),
        "sk-test",
        server.uri(),
    ));
    let retries = RetryPolicy {
        max_retries: 3,
        initial_delay_ms: 1,
        max_delay_ms: 2,
        backoff_multiplier: 2.0,
    };
    let provider = ResilientLlmProvider::new(inner, CallGuard::new(retries, None));

    let err = provider
        .chat("gpt-3.5-turbo", LlmRequest::builder().user(CLAIM).build())
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Internal { .. }));
}
