//! HTTP client for the zero-shot classifier and the chat-completions endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::EmailAnalyzer;
use super::prompts::{build_suggestion_system_prompt, build_suggestion_user_prompt};
use super::transport::JsonTransport;
use super::types::Category;
use crate::config::AnalysisConfig;
use crate::error::{Error, ServiceError};

const CLASSIFIER: &str = "classifier";
const SUGGESTION: &str = "suggestion";

/// Max tokens for the generated reply.
const SUGGESTION_MAX_TOKENS: u32 = 200;

/// Low randomness keeps replies on-script.
const SUGGESTION_TEMPERATURE: f32 = 0.3;

const SUGGESTION_TOP_P: f32 = 0.8;

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    parameters: ClassifyParameters,
}

#[derive(Debug, Serialize)]
struct ClassifyParameters {
    candidate_labels: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    labels: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: String) -> Self {
        Self {
            role: "system".to_string(),
            content,
        }
    }

    fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

/// Only the generated text is read back; `role` may be absent.
#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

// ── Client ──────────────────────────────────────────────────────────

/// Classifies an email, then asks the generation model for a reply.
pub struct HttpEmailAnalyzer {
    transport: JsonTransport,
    classifier_url: String,
    suggestion_url: String,
    model: String,
    allow_unknown_labels: bool,
}

impl HttpEmailAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Result<Self, ServiceError> {
        let transport = JsonTransport::new(config.api_token.clone(), config.request_timeout)?;
        info!(
            classifier = %config.classifier_url,
            model = %config.suggestion_model,
            timeout_secs = config.request_timeout.as_secs(),
            "Email analyzer configured"
        );
        Ok(Self {
            transport,
            classifier_url: config.classifier_url.clone(),
            suggestion_url: config.suggestion_url.clone(),
            model: config.suggestion_model.clone(),
            allow_unknown_labels: config.allow_unknown_labels,
        })
    }

    /// Ask the classifier for the best-ranked category.
    pub async fn classify(&self, normalized_text: &str) -> Result<Category, ServiceError> {
        let request = ClassifyRequest {
            inputs: normalized_text,
            parameters: ClassifyParameters {
                candidate_labels: Category::candidate_labels(),
            },
        };

        let response: ClassifyResponse = self
            .transport
            .post(CLASSIFIER, &self.classifier_url, &request)
            .await?;

        let top = response
            .labels
            .into_iter()
            .next()
            .ok_or(ServiceError::EmptyLabels)?;

        match Category::from_label(&top) {
            Some(category) => Ok(category),
            None if self.allow_unknown_labels => {
                warn!(label = %top, "Classifier returned an unknown label; using generic instructions");
                Ok(Category::Other(top))
            }
            None => Err(ServiceError::UnexpectedLabel(top)),
        }
    }

    /// Generate a reply for `email_content` given its category.
    pub async fn suggest(&self, category: &Category, email_content: &str) -> Result<String, ServiceError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage::system(build_suggestion_system_prompt()),
                ChatMessage::user(build_suggestion_user_prompt(category, email_content)),
            ],
            max_tokens: SUGGESTION_MAX_TOKENS,
            temperature: SUGGESTION_TEMPERATURE,
            top_p: SUGGESTION_TOP_P,
        };

        let response: ChatResponse = self
            .transport
            .post(SUGGESTION, &self.suggestion_url, &request)
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ServiceError::EmptyChoices)
    }
}

#[async_trait]
impl EmailAnalyzer for HttpEmailAnalyzer {
    async fn analyze(&self, normalized_text: &str, original_text: &str) -> Result<(Category, String), Error> {
        let category = self.classify(normalized_text).await.inspect_err(|e| {
            warn!(error = %e, "Classification failed");
        })?;
        debug!(category = %category, "Email classified");

        let suggestion = self.suggest(&category, original_text).await.inspect_err(|e| {
            warn!(error = %e, category = %category, "Suggestion failed");
        })?;

        Ok((category, suggestion))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const CLASSIFY_PATH: &str = "/models/classifier";
    const CHAT_PATH: &str = "/v1/chat/completions";

    fn analyzer(server: &MockServer, allow_unknown_labels: bool) -> HttpEmailAnalyzer {
        let mut config = AnalysisConfig::new(
            format!("{}{CLASSIFY_PATH}", server.uri()),
            format!("{}{CHAT_PATH}", server.uri()),
            SecretString::from("hf_test"),
        );
        config.allow_unknown_labels = allow_unknown_labels;
        HttpEmailAnalyzer::new(&config).unwrap()
    }

    async fn mount_classifier(server: &MockServer, labels: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(CLASSIFY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sequence": "texto",
                "labels": labels,
                "scores": [0.9, 0.1]
            })))
            .mount(server)
            .await;
    }

    async fn mount_chat(server: &MockServer, content: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": content}}
                ]
            })))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn classify_sends_candidate_labels() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CLASSIFY_PATH))
            .and(header("Authorization", "Bearer hf_test"))
            .and(body_partial_json(serde_json::json!({
                "inputs": "status pedid",
                "parameters": {"candidate_labels": ["Produtivo", "Improdutivo"]}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "labels": ["Improdutivo", "Produtivo"],
                "scores": [0.7, 0.3]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let category = analyzer(&server, false).classify("status pedid").await.unwrap();
        assert_eq!(category, Category::Unproductive);
    }

    #[tokio::test]
    async fn analyze_returns_category_and_suggestion() {
        let server = MockServer::start().await;
        mount_classifier(&server, serde_json::json!(["Produtivo", "Improdutivo"])).await;
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(header("Authorization", "Bearer hf_test"))
            .and(body_partial_json(serde_json::json!({
                "model": "google/gemma-2-2b-it",
                "max_tokens": 200
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Recebemos seu pedido."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (category, suggestion) = analyzer(&server, false)
            .analyze("status pedid", "Qual o status do pedido?")
            .await
            .unwrap();
        assert_eq!(category, Category::Productive);
        assert_eq!(suggestion, "Recebemos seu pedido.");
    }

    #[tokio::test]
    async fn suggestion_prompt_embeds_original_content() {
        let server = MockServer::start().await;
        mount_classifier(&server, serde_json::json!(["Produtivo", "Improdutivo"])).await;
        mount_chat(&server, "ok", 1).await;

        analyzer(&server, false)
            .analyze("status pedid", "Qual o status do pedido #42?")
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let chat = requests
            .iter()
            .find(|r| r.url.path() == CHAT_PATH)
            .expect("chat request");
        let body: serde_json::Value = serde_json::from_slice(&chat.body).unwrap();
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        let user = body["messages"][1]["content"].as_str().unwrap();
        assert!(user.contains("Qual o status do pedido #42?"));
        assert!(user.contains("CATEGORIA DO EMAIL: Produtivo"));
        assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert!((body["top_p"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    }

    #[tokio::test]
    async fn classifier_failure_skips_suggestion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CLASSIFY_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
            .expect(1)
            .mount(&server)
            .await;
        mount_chat(&server, "never", 0).await;

        let err = analyzer(&server, false)
            .analyze("texto", "texto")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Service(ServiceError::Status { endpoint: "classifier", status: 500 })
        ));
        assert_eq!(err.public_detail(), ServiceError::PUBLIC_MESSAGE);
    }

    #[tokio::test]
    async fn empty_labels_are_rejected() {
        let server = MockServer::start().await;
        mount_classifier(&server, serde_json::json!([])).await;
        mount_chat(&server, "never", 0).await;

        let err = analyzer(&server, false).analyze("texto", "texto").await.unwrap_err();
        assert!(matches!(err, Error::Service(ServiceError::EmptyLabels)));
    }

    #[tokio::test]
    async fn missing_labels_field_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CLASSIFY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "error": "Model is loading"
            })))
            .mount(&server)
            .await;

        let err = analyzer(&server, false).classify("texto").await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse { endpoint: "classifier", .. }));
    }

    #[tokio::test]
    async fn unknown_label_is_rejected_by_default() {
        let server = MockServer::start().await;
        mount_classifier(&server, serde_json::json!(["Spam", "Produtivo"])).await;
        mount_chat(&server, "never", 0).await;

        let err = analyzer(&server, false).analyze("texto", "texto").await.unwrap_err();
        assert!(matches!(err, Error::Service(ServiceError::UnexpectedLabel(ref l)) if l == "Spam"));
    }

    #[tokio::test]
    async fn unknown_label_uses_generic_instructions_when_allowed() {
        let server = MockServer::start().await;
        mount_classifier(&server, serde_json::json!(["Spam", "Produtivo"])).await;
        mount_chat(&server, "Obrigado pelo contato.", 1).await;

        let (category, suggestion) = analyzer(&server, true)
            .analyze("texto", "texto")
            .await
            .unwrap();
        assert_eq!(category, Category::Other("Spam".into()));
        assert_eq!(suggestion, "Obrigado pelo contato.");
    }

    #[tokio::test]
    async fn reply_without_role_is_accepted() {
        let server = MockServer::start().await;
        mount_classifier(&server, serde_json::json!(["Produtivo", "Improdutivo"])).await;
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": "Resposta"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (_, suggestion) = analyzer(&server, false)
            .analyze("status pedid", "Qual o status do pedido?")
            .await
            .unwrap();
        assert_eq!(suggestion, "Resposta");
    }

    #[tokio::test]
    async fn empty_choices_are_rejected() {
        let server = MockServer::start().await;
        mount_classifier(&server, serde_json::json!(["Produtivo", "Improdutivo"])).await;
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
            .mount(&server)
            .await;

        let err = analyzer(&server, false).analyze("texto", "texto").await.unwrap_err();
        assert!(matches!(err, Error::Service(ServiceError::EmptyChoices)));
    }

    #[tokio::test]
    async fn suggestion_error_status_is_reported() {
        let server = MockServer::start().await;
        mount_classifier(&server, serde_json::json!(["Improdutivo", "Produtivo"])).await;
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = analyzer(&server, false).analyze("texto", "texto").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Service(ServiceError::Status { endpoint: "suggestion", status: 401 })
        ));
    }
}
