use super::LlmClient;
use crate::error::ServiceError;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

/// Minimal request/response structs for the Gemini `generateContent` API.
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
    status: Option<String>,
}

/// Gemini-based implementation of LlmClient.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    api_base_url: String,
}

impl GeminiClient {
    /// The transport keeps reqwest's default timeout.
    pub fn new(api_key: String, model: String, api_base_url: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        Ok(GeminiClient {
            client,
            api_key,
            model,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn generate_url(&self) -> String {
        let model = self.model.trim_start_matches("models/");
        format!("{}/models/{}:generateContent", self.api_base_url, model)
    }
}

impl LlmClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let url = self.generate_url();
        let req = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        log::info!("Calling Gemini model {:?}", &self.model);

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .map_err(|source| ServiceError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        let body = resp.text().map_err(|source| ServiceError::Transport {
            url: url.clone(),
            source,
        })?;

        log::trace!("Gemini raw response ({}): {body}", status.as_u16());

        if !status.is_success() {
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        extract_text(&body)
    }
}

/// Prefer the structured `error.message` Gemini sends; fall back to the raw body.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => match parsed.error.status {
            Some(status) => format!("{status}: {}", parsed.error.message),
            None => parsed.error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}

/// Pull the text out of a successful `generateContent` reply.
fn extract_text(body: &str) -> Result<String, ServiceError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))?;

    if let Some(usage) = &parsed.usage_metadata {
        log::info!(
            "Token usage: prompt={}, completion={}, total={}",
            usage.prompt_token_count.unwrap_or_default(),
            usage.candidates_token_count.unwrap_or_default(),
            usage.total_token_count.unwrap_or_default()
        );
    }

    let Some(candidate) = parsed.candidates.into_iter().next() else {
        return match parsed.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(ServiceError::Blocked(reason)),
            None => Err(ServiceError::EmptyResponse),
        };
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return match candidate.finish_reason.as_deref() {
            Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                Err(ServiceError::Blocked(reason.to_string()))
            }
            _ => Err(ServiceError::EmptyResponse),
        };
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_model() {
        let client = GeminiClient::new(
            "k".into(),
            "models/gemini-3-flash".into(),
            "https://example.test/v1beta/".into(),
        )
        .unwrap();

        assert_eq!(
            client.generate_url(),
            "https://example.test/v1beta/models/gemini-3-flash:generateContent"
        );
    }

    #[test]
    fn request_body_matches_wire_shape() {
        let req = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hello" }],
            }],
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"contents": [{"role": "user", "parts": [{"text": "hello"}]}]})
        );
    }

    #[test]
    fn text_parts_of_first_candidate_are_joined() {
        let body = r####"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "### Bug Fixes\n"}, {"text": "- Fixed a crash."}]},
                 "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        }"####;

        assert_eq!(extract_text(body).unwrap(), "### Bug Fixes\n- Fixed a crash.");
    }

    #[test]
    fn blocked_prompt_is_reported() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        assert!(matches!(extract_text(body), Err(ServiceError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn missing_candidates_is_empty_response() {
        assert!(matches!(extract_text("{}"), Err(ServiceError::EmptyResponse)));
        let whitespace = r#"{"candidates": [{"content": {"parts": [{"text": "  \n"}]}}]}"#;
        assert!(matches!(extract_text(whitespace), Err(ServiceError::EmptyResponse)));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        assert!(matches!(extract_text("<html>"), Err(ServiceError::Decode(_))));
    }

    #[test]
    fn api_errors_prefer_the_structured_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "INVALID_ARGUMENT: API key not valid.");
        assert_eq!(api_error_message(" upstream down \n"), "upstream down");
    }
}
