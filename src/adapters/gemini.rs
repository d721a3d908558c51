use crate::domain::model::TransmissionResult;
use crate::domain::ports::{ConfigProvider, TransmissionFetcher};
use crate::utils::error::{ChronosError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Transmission fetcher backed by the Gemini `generateContent` API.
pub struct GeminiFetcher {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl GeminiFetcher {
    pub fn new(endpoint: &str, model: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint().to_string(),
            model: config.model().to_string(),
            api_key: config.api_key().map(str::to_string),
        })
    }

    pub fn request_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    pub fn build_prompt(current_time_label: &str) -> String {
        format!(
            "The current time is {}.\n\
             You are a mysterious radio transmitter from a retro-futuristic parallel universe \
             (Cyberpunk 1980s, Steampunk, or Synthwave aesthetic).\n\
             Broadcast a short, cryptic, or atmospheric message to the user.\n\
             It could be a weather report from Mars, a traffic update for flying cars, \
             a philosophical musing on time, or a snippet of code from the Matrix.\n\
             Keep it under 40 words.\n\
             Also, invent a cool \"Frequency\" (e.g., \"104.5 FM - Neo Tokyo\", \"Subspace Channel 7\").",
            current_time_label
        )
    }

    fn request_body(current_time_label: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": Self::build_prompt(current_time_label) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "message": { "type": "STRING" },
                        "frequency": { "type": "STRING" },
                        "timestamp": {
                            "type": "STRING",
                            "description": "The current fictional timestamp of the sender"
                        }
                    },
                    "required": ["message", "frequency", "timestamp"]
                }
            }
        })
    }

    /// The fallible call underneath [`TransmissionFetcher::request_transmission`].
    pub async fn try_request(&self, current_time_label: &str) -> Result<TransmissionResult> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ChronosError::MissingConfigError {
                field: "transmission.api_key".to_string(),
            })?;

        let url = self.request_url();
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(current_time_label))
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChronosError::ApiStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload.text().ok_or(ChronosError::EmptyResponseError)?;

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl TransmissionFetcher for GeminiFetcher {
    async fn request_transmission(&self, current_time_label: &str) -> TransmissionResult {
        match self.try_request(current_time_label).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    "❌ Transmission failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                TransmissionResult::signal_lost()
            }
        }
    }
}
