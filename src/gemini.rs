//! Gemini API client
//!
//! Plain text generation with a system instruction and optional prior turns.
//! Uses a long-lived reqwest::Client for connection pooling.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::history::{ConversationTurn, TurnRole};
use crate::Result;

/// Text generation seam used by the classifier and the composer
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(
        &self,
        system_instruction: &str,
        history: &[ConversationTurn],
        prompt: &str,
    ) -> Result<String>;
}

/// Reusable Gemini client (connection-pooled)
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: &str, model: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .build()?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Self::new(
            config.gemini_api_key.clone(),
            &config.gemini_base_url,
            &config.gemini_model,
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(
        &self,
        system_instruction: &str,
        history: &[ConversationTurn],
        prompt: &str,
    ) -> Result<String> {
        if self.api_key.is_empty() {
            return Err(AgentError::Llm("GEMINI_API_KEY not configured".to_string()));
        }

        let request = build_request(system_instruction, history, prompt);

        debug!(turns = history.len(), "Calling Gemini API");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                AgentError::Llm(format!("Gemini API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini API error response ({}): {}", status, error_text);
            return Err(AgentError::Llm(format!(
                "Gemini API returned {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            AgentError::Llm(format!("Gemini parse error: {}", e))
        })?;

        let answer = extract_text(&gemini_response)
            .ok_or_else(|| AgentError::Llm("Empty response from Gemini".to_string()))?;

        info!(
            finish_reason = gemini_response
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("n/a"),
            "Gemini response received"
        );

        Ok(answer)
    }
}

fn build_request(
    system_instruction: &str,
    history: &[ConversationTurn],
    prompt: &str,
) -> GeminiRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .map(|turn| Content {
            role: Some(
                match turn.role {
                    TurnRole::User => "user",
                    TurnRole::Agent => "model",
                }
                .to_string(),
            ),
            parts: vec![Part {
                text: turn.content.clone(),
            }],
        })
        .collect();

    contents.push(Content {
        role: Some("user".to_string()),
        parts: vec![Part {
            text: prompt.to_string(),
        }],
    });

    GeminiRequest {
        contents,
        generation_config: GenerationConfig {
            temperature: 0.4,
            top_p: 0.9,
            top_k: 40,
            max_output_tokens: 1024,
        },
        system_instruction: SystemInstruction {
            parts: vec![Part {
                text: system_instruction.to_string(),
            }],
        },
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: &GeminiResponse) -> Option<String> {
    let candidate = response.candidates.first()?;
    let text: String = candidate
        .content
        .as_ref()?
        .parts
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join("");

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    system_instruction: SystemInstruction,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: i32,
    max_output_tokens: i32,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_request_serialization() {
        let history = vec![
            ConversationTurn::user("I lost my job"),
            ConversationTurn::agent("I'm sorry to hear that."),
        ];
        let request = build_request("Identify the mood", &history, "I'm feeling sad today.");

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"].as_array().unwrap().len(), 3);
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][2]["parts"][0]["text"], "I'm feeling sad today.");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "Identify the mood");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mock_server = MockServer::start().await;

        let body = serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "  sad\n" }] },
                "finishReason": "STOP"
            }]
        });

        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client =
            GeminiClient::new("test-key".to_string(), &mock_server.uri(), "gemini-test").unwrap();
        let answer = client.generate("system", &[], "I'm feeling sad today.").await.unwrap();

        assert_eq!(answer, "sad");
    }

    #[tokio::test]
    async fn test_generate_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let client =
            GeminiClient::new("test-key".to_string(), &mock_server.uri(), "gemini-test").unwrap();
        let result = client.generate("system", &[], "hello").await;

        assert!(matches!(result, Err(AgentError::Llm(_))));
    }

    #[tokio::test]
    async fn test_generate_empty_candidates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "candidates": [] })),
            )
            .mount(&mock_server)
            .await;

        let client =
            GeminiClient::new("test-key".to_string(), &mock_server.uri(), "gemini-test").unwrap();
        assert!(client.generate("system", &[], "hello").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = GeminiClient::new(String::new(), "http://127.0.0.1:9", "gemini-test").unwrap();
        let result = client.generate("system", &[], "hello").await;

        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("GEMINI_API_KEY"));
    }
}
