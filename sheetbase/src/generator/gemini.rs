//! Gemini integration via REST API (no SDK dependency)

use super::{DraftProvider, GenerationError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{RecordDraft, RecordStatus};
use std::time::Duration;

use crate::AppConfig;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Fixed instruction; the provider decides batch content
pub const BATCH_PROMPT: &str = "Generate 5 realistic dummy employee records for a tech company.";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Draft generator backed by the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GenerationError> {
        Self::new(
            config.api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            config.request_timeout_secs,
        )
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Request body: prompt plus a JSON schema pinning the draft shape
    fn request_body() -> serde_json::Value {
        let statuses: Vec<&str> = RecordStatus::ALL.iter().map(|s| s.as_str()).collect();
        serde_json::json!({
            "contents": [
                { "role": "user", "parts": [ { "text": BATCH_PROMPT } ] }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "role": { "type": "STRING" },
                            "department": { "type": "STRING" },
                            "email": { "type": "STRING" },
                            "status": { "type": "STRING", "enum": statuses }
                        },
                        "required": ["name", "role", "department", "email", "status"]
                    }
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[async_trait]
impl DraftProvider for GeminiProvider {
    async fn generate(&self) -> Result<Vec<RecordDraft>, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        tracing::debug!(model = %self.model, "requesting generated drafts");
        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, api_key)
            .json(&Self::request_body())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            tracing::warn!(status = status.as_u16(), %message, "provider rejected request");
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| GenerationError::Malformed(format!("response envelope: {e}")))?;
        let Some(payload) = body.into_text() else {
            return Err(GenerationError::Empty);
        };

        let drafts: Vec<RecordDraft> = serde_json::from_str(&payload)
            .map_err(|e| GenerationError::Malformed(format!("draft list: {e}")))?;
        if drafts.is_empty() {
            return Err(GenerationError::Empty);
        }

        tracing::info!(count = drafts.len(), "provider returned drafts");
        Ok(drafts)
    }
}
