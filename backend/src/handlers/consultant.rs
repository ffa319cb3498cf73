use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use futures::future::BoxFuture;
use openai_api_rs::v1::api::OpenAIClient;
use openai_api_rs::v1::chat_completion::{self, ChatCompletionRequest};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::utils::rate_limit::ClientIp;
use crate::AppState;

const SYSTEM_INSTRUCTION: &str = "You are the Senior Technical Architect at ZENTRIX. Your goal is to explain how our custom software, AI WhatsApp Automation, and Cloud Infrastructure can revolutionize a business. Be helpful, professional, and focus on the technical excellence of ZENTRIX. Always encourage users to contact us at 7089935002 for a personalized consultation.";
const TEMPERATURE: f64 = 0.7;
const PROMPT_PREFIX: &str = "Architecture query: ";

pub const OFFLINE_REPLY: &str =
    "System offline. API configuration missing. Please contact ZENTRIX at 7089935002.";
pub const EMPTY_REPLY: &str = "Communication delay. Please contact ZENTRIX directly at 7089935002.";
pub const SYNCING_REPLY: &str =
    "The system is currently syncing. Reach out to ZENTRIX at 7089935002 for immediate assistance.";

#[derive(Debug, Error)]
pub enum ConsultantError {
    #[error("LLM API key is not configured")]
    MissingKey,
    #[error("LLM returned no text")]
    EmptyReply,
    #[error("LLM request failed: {0}")]
    Upstream(String),
}

impl ConsultantError {
    /// What the visitor sees instead of an answer.
    pub fn fallback_reply(&self) -> &'static str {
        match self {
            ConsultantError::MissingKey => OFFLINE_REPLY,
            ConsultantError::EmptyReply => EMPTY_REPLY,
            ConsultantError::Upstream(_) => SYNCING_REPLY,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait AdviceSource: Send + Sync {
    fn advise(&self, prompt: String) -> BoxFuture<'static, Result<String, ConsultantError>>;
}

/// Gemini through its OpenAI-compatible endpoint.
pub struct GeminiConsultant {
    client: Option<Arc<OpenAIClient>>,
    model: String,
}

impl GeminiConsultant {
    pub fn new(endpoint: &str, api_key: Option<String>, model: String) -> anyhow::Result<Self> {
        let client = match api_key {
            Some(api_key) => Some(Arc::new(
                OpenAIClient::builder()
                    .with_endpoint(endpoint)
                    .with_api_key(api_key)
                    .build()
                    .map_err(|e| anyhow::anyhow!("Failed to build OpenAI client: {}", e))?,
            )),
            None => {
                tracing::warn!("GEMINI_API_KEY not set, consultant will answer with the offline reply");
                None
            }
        };
        Ok(Self { client, model })
    }
}

fn build_request(model: &str, prompt: String) -> ChatCompletionRequest {
    let messages = vec![
        chat_completion::ChatCompletionMessage {
            role: chat_completion::MessageRole::system,
            content: chat_completion::Content::Text(SYSTEM_INSTRUCTION.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        chat_completion::ChatCompletionMessage {
            role: chat_completion::MessageRole::user,
            content: chat_completion::Content::Text(prompt),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ];
    ChatCompletionRequest::new(model.to_string(), messages).temperature(TEMPERATURE)
}

impl AdviceSource for GeminiConsultant {
    fn advise(&self, prompt: String) -> BoxFuture<'static, Result<String, ConsultantError>> {
        let client = self.client.clone();
        let request = build_request(&self.model, prompt);
        Box::pin(async move {
            let client = client.ok_or(ConsultantError::MissingKey)?;
            let result = client
                .chat_completion(request)
                .await
                .map_err(|e| ConsultantError::Upstream(e.to_string()))?;
            result
                .choices
                .first()
                .and_then(|choice| choice.message.content.clone())
                .filter(|text| !text.trim().is_empty())
                .ok_or(ConsultantError::EmptyReply)
        })
    }
}

#[derive(Deserialize)]
pub struct ConsultantRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConsultantResponse {
    pub reply: String,
}

pub async fn ask_consultant(
    State(state): State<Arc<AppState>>,
    ClientIp(ip): ClientIp,
    Json(request): Json<ConsultantRequest>,
) -> Result<Json<ConsultantResponse>, (StatusCode, Json<Value>)> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Prompt is required"})),
        ));
    }

    if !state.limiter.allow(ip) {
        tracing::warn!("Consultant rate limit hit for {}", ip);
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": "Too many questions, please wait a minute"})),
        ));
    }

    let reply = match state.consultant.advise(format!("{}{}", PROMPT_PREFIX, prompt)).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("Consultant fallback used: {}", e);
            e.fallback_reply().to_string()
        }
    };

    Ok(Json(ConsultantResponse { reply }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_instruction_and_temperature() {
        let request = build_request("gemini-test", "Architecture query: hi".to_string());
        assert_eq!(request.model, "gemini-test");
        assert_eq!(request.temperature, Some(TEMPERATURE));
        assert_eq!(request.messages.len(), 2);
        assert!(matches!(
            &request.messages[0].content,
            chat_completion::Content::Text(text) if text == SYSTEM_INSTRUCTION
        ));
    }

    #[tokio::test]
    async fn missing_key_yields_offline_error() {
        let consultant = GeminiConsultant::new("http://unused", None, "m".to_string()).unwrap();
        let err = consultant.advise("hello".to_string()).await.unwrap_err();
        assert!(matches!(err, ConsultantError::MissingKey));
        assert_eq!(err.fallback_reply(), OFFLINE_REPLY);
    }

    #[test]
    fn fallbacks_match_failure_kind() {
        assert_eq!(ConsultantError::EmptyReply.fallback_reply(), EMPTY_REPLY);
        assert_eq!(
            ConsultantError::Upstream("503".to_string()).fallback_reply(),
            SYNCING_REPLY
        );
    }
}
