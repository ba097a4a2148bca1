//! Gemini-backed vision client.
//!
//! Calls the `generateContent` endpoint with an inline image and a JSON
//! response schema so the model output deserializes straight into an
//! [`AnalysisResult`].

use super::client::{VisionClient, VisionRequest};
use super::error::VisionError;
use crate::model::{AnalysisResult, Language};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

pub struct GeminiVisionClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    timeout: Duration,
}

impl GeminiVisionClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, VisionError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(VisionError::ConfigurationError {
                message: "Gemini API key is empty".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VisionError::ConfigurationError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout,
        })
    }

    /// Overrides the API endpoint, for tests and proxies.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn prompt(language: Language) -> String {
        let lang_instruction = match language {
            Language::Id => "Bahasa Indonesia",
            Language::En => "English",
        };
        format!(
            "You are an expert brand strategist and copywriter for high-end local brands.\n\
             Analyze this image of a product or service.\n\
             Create compelling, sophisticated copy for a modern landing page.\n\n\
             Return a JSON object with:\n\
             1. businessNameSuggestion: A modern, premium name for the business (if not obvious).\n\
             2. headline: A sophisticated, punchy hook (max 8 words) in {lang}.\n\
             3. story: A 2-sentence emotional brand story ({lang}) that elevates the perceived value.\n\
             4. suggestedTemplate: One of [\"culinary\", \"fashion\", \"service\"] based on the image content.\n\
             5. locationSuggestion: The business location, only if visible in the image.",
            lang = lang_instruction
        )
    }

    fn request_body(&self, request: &VisionRequest) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": "image/jpeg",
                            "data": request.image_base64,
                        }
                    },
                    { "text": Self::prompt(request.language) },
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "businessNameSuggestion": { "type": "STRING" },
                        "headline": { "type": "STRING" },
                        "story": { "type": "STRING" },
                        "suggestedTemplate": {
                            "type": "STRING",
                            "enum": ["culinary", "fashion", "service"],
                        },
                        "locationSuggestion": { "type": "STRING" },
                    },
                    "required": [
                        "businessNameSuggestion",
                        "headline",
                        "story",
                        "suggestedTemplate",
                    ],
                },
            },
        })
    }
}

#[async_trait]
impl VisionClient for GeminiVisionClient {
    async fn analyze(&self, request: VisionRequest) -> Result<AnalysisResult, VisionError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        debug!(model = %self.model, language = %request.language.as_str(), "Sending analysis request");

        let response = self
            .http
            .post(&url)
            .json(&self.request_body(&request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    VisionError::TimeoutError {
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    VisionError::NetworkError {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, "Gemini API error: {}", body);
            return Err(VisionError::ApiError {
                message: body,
                status_code: Some(status.as_u16()),
            });
        }

        let payload: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| VisionError::InvalidResponse {
                    message: format!("response body is not JSON: {}", e),
                })?;

        let text = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| VisionError::InvalidResponse {
                message: "no response text from model".to_string(),
            })?;

        serde_json::from_str(text).map_err(|e| VisionError::InvalidResponse {
            message: format!("model output does not match schema: {}", e),
        })
    }

    fn name(&self) -> &str {
        "GeminiVisionClient"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        let result = GeminiVisionClient::new("", Duration::from_secs(30));
        assert!(matches!(
            result,
            Err(VisionError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_request_body_schema_fields() {
        let client = GeminiVisionClient::new("key", Duration::from_secs(30)).unwrap();
        let body = client.request_body(&VisionRequest::new("aGVsbG8=", Language::En));

        let schema = &body["generationConfig"]["responseSchema"];
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 4);
        assert!(required.iter().any(|v| v == "suggestedTemplate"));
        // locationSuggestion stays optional.
        assert!(schema["properties"]["locationSuggestion"].is_object());
        assert!(!required.iter().any(|v| v == "locationSuggestion"));

        let enum_values = schema["properties"]["suggestedTemplate"]["enum"]
            .as_array()
            .unwrap();
        assert_eq!(enum_values.len(), 3);
    }

    #[test]
    fn test_prompt_language_instruction() {
        assert!(GeminiVisionClient::prompt(Language::Id).contains("Bahasa Indonesia"));
        assert!(GeminiVisionClient::prompt(Language::En).contains("English"));
    }
}
