use crate::intake::prelude::UploadedImage;
use crate::shared::prelude::RoastPersona;
use serde_json::Value;

/// Sampling temperature used for every review. High on purpose, the humour depends on it.
pub const TEMPERATURE: f64 = 1.2;

/// Everything one call to the analysis service needs. Built per call, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Raw base64, no `data:` header.
    pub image_base64: String,
    pub media_type: String,
    pub system_instruction: String,
    pub user_prompt: String,
    pub response_schema: Value,
    pub temperature: f64,
}

impl AnalysisRequest {
    pub fn new(image: &UploadedImage, persona: &RoastPersona) -> Self {
        Self {
            image_base64: strip_data_uri_prefix(&image.data_uri).to_string(),
            media_type: image.media_type.clone(),
            system_instruction: persona.system_instruction.clone(),
            user_prompt: persona.user_prompt.clone(),
            response_schema: persona.response_schema.clone(),
            temperature: TEMPERATURE,
        }
    }
}

/// Drops a `data:<type>;base64,` header. Input without a header, or with nothing
/// after the comma, is returned unchanged.
pub fn strip_data_uri_prefix(input: &str) -> &str {
    match input.split_once(',') {
        Some((_, payload)) if !payload.is_empty() => payload,
        _ => input,
    }
}
