use super::error::AnalysisError;
use super::provider::AnalysisProvider;
use super::request::AnalysisRequest;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Calls Gemini `generateContent` with the photo inline.
pub struct GeminiProvider {
    client: Client,
    api_key: SecretString,
    base_url: Url,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: SecretString, base_url: Url, model: &str) -> Result<Self, AnalysisError> {
        Self::with_client(Client::new(), api_key, base_url, model)
    }

    pub fn with_client(
        client: Client,
        api_key: SecretString,
        base_url: Url,
        model: &str,
    ) -> Result<Self, AnalysisError> {
        if api_key.expose_secret().trim().is_empty() {
            return Err(AnalysisError::MissingCredential);
        }

        Ok(Self {
            client,
            api_key,
            base_url,
            model: model.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl AnalysisProvider for GeminiProvider {
    async fn generate(&self, request: &AnalysisRequest) -> Result<Option<String>, AnalysisError> {
        let body = GenerateContentRequest::from(request);
        let url = self.endpoint();
        debug!(
            "Sending {} ({} base64 chars) to {}",
            request.media_type,
            request.image_base64.len(),
            url
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!("Gemini answered {}: {}", status, text);
            return Err(AnalysisError::ServiceStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            AnalysisError::MalformedResponse(format!("unexpected response envelope: {}", e))
        })?;

        Ok(envelope.text())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    system_instruction: SystemInstruction<'a>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct RequestPart<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
    temperature: f64,
}

impl<'a> From<&'a AnalysisRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a AnalysisRequest) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![
                    RequestPart {
                        inline_data: Some(InlineData {
                            mime_type: &request.media_type,
                            data: &request.image_base64,
                        }),
                        ..Default::default()
                    },
                    RequestPart {
                        text: Some(&request.user_prompt),
                        ..Default::default()
                    },
                ],
            }],
            system_instruction: SystemInstruction {
                parts: vec![RequestPart {
                    text: Some(&request.system_instruction),
                    ..Default::default()
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined.
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() { None } else { Some(text) }
    }
}
