use super::error::AnalysisError;
use super::provider::AnalysisProvider;
use super::request::AnalysisRequest;
use super::result::AnalysisResult;
use crate::intake::prelude::UploadedImage;
use crate::models::prelude::HelpMetadata;
use crate::shared::prelude::RoastPersona;
use std::sync::Arc;
use tracing::{debug, info};

/// Turns an uploaded photo into a validated review. One provider call per `analyze`, no retries.
pub struct AnalysisClient {
    provider: Arc<dyn AnalysisProvider>,
    persona: RoastPersona,
}

impl AnalysisClient {
    pub fn new(provider: Arc<dyn AnalysisProvider>, persona: RoastPersona) -> Self {
        Self { provider, persona }
    }

    pub async fn analyze(&self, image: &UploadedImage) -> Result<AnalysisResult, AnalysisError> {
        let request = AnalysisRequest::new(image, &self.persona);
        info!(target: "progress", "Sending {} to the director ({})", image.file_name, self.persona.name());

        let payload = self.provider.generate(&request).await?;
        let result = parse_analysis_payload(payload)?;
        debug!(
            "Review scored {} with {} roast and {} advice lines",
            result.snapshot.score,
            result.roast.len(),
            result.advice.len()
        );

        Ok(result)
    }
}

pub fn parse_analysis_payload(payload: Option<String>) -> Result<AnalysisResult, AnalysisError> {
    let text = match payload {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(AnalysisError::EmptyResponse),
    };

    serde_json::from_str::<AnalysisResult>(&text)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::error::SERVICE_FAILURE_MESSAGE;
    use crate::analysis::provider::MockAnalysisProvider;
    use crate::analysis::request::TEMPERATURE;

    const NORMCORE: &str = r#"{
        "snapshot": {"score": 7.5, "style": "Normcore", "keywords": ["safe", "beige", "sleepy"]},
        "roast": ["r1", "r2", "r3", "r4", "r5", "r6"],
        "advice": ["a1", "a2", "a3", "a4"],
        "scoreComment": "Passable, like tap water."
    }"#;

    fn image() -> UploadedImage {
        UploadedImage {
            data_uri: "data:image/jpeg;base64,/9j/4AAQ".to_string(),
            media_type: "image/jpeg".to_string(),
            size_bytes: 6,
            file_name: "look.jpg".to_string(),
            dimensions: Some((1, 1)),
        }
    }

    #[tokio::test]
    async fn valid_payload_is_returned_unchanged() {
        let mut provider = MockAnalysisProvider::new();
        provider
            .expect_generate()
            .times(1)
            .withf(|request| {
                request.image_base64 == "/9j/4AAQ"
                    && request.media_type == "image/jpeg"
                    && request.temperature == TEMPERATURE
            })
            .returning(|_| Ok(Some(NORMCORE.to_string())));

        let client = AnalysisClient::new(Arc::new(provider), RoastPersona::builtin());
        let result = client.analyze(&image()).await.unwrap();

        assert_eq!(7.5, result.snapshot.score);
        assert_eq!("Normcore", result.snapshot.style);
        assert_eq!(vec!["safe", "beige", "sleepy"], result.snapshot.keywords);
        assert_eq!(vec!["r1", "r2", "r3", "r4", "r5", "r6"], result.roast);
        assert_eq!(vec!["a1", "a2", "a3", "a4"], result.advice);
        assert_eq!("Passable, like tap water.", result.score_comment);
    }

    #[tokio::test]
    async fn no_text_is_empty_response() {
        let mut provider = MockAnalysisProvider::new();
        provider.expect_generate().times(1).returning(|_| Ok(None));

        let client = AnalysisClient::new(Arc::new(provider), RoastPersona::builtin());
        let err = client.analyze(&image()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::EmptyResponse));
        assert_eq!(SERVICE_FAILURE_MESSAGE, err.user_message());
    }

    #[tokio::test]
    async fn provider_errors_are_passed_through() {
        let mut provider = MockAnalysisProvider::new();
        provider.expect_generate().times(1).returning(|_| {
            Err(AnalysisError::ServiceStatus {
                status: 500,
                body: "boom".to_string(),
            })
        });

        let client = AnalysisClient::new(Arc::new(provider), RoastPersona::builtin());
        let err = client.analyze(&image()).await.unwrap_err();

        assert!(matches!(err, AnalysisError::ServiceStatus { status: 500, .. }));
    }

    #[test]
    fn blank_text_is_empty_response() {
        let err = parse_analysis_payload(Some("  \n".to_string())).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyResponse));
    }

    #[test]
    fn missing_key_is_malformed() {
        let payload = NORMCORE.replace("\"scoreComment\"", "\"comment\"");
        let err = parse_analysis_payload(Some(payload)).unwrap_err();

        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
        assert!(err.to_string().contains("scoreComment"), "{}", err);
    }

    #[test]
    fn wrong_type_is_malformed() {
        let payload = NORMCORE.replace("7.5", "\"high\"");
        let err = parse_analysis_payload(Some(payload)).unwrap_err();

        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn not_json_is_malformed() {
        let err = parse_analysis_payload(Some("I refuse.".to_string())).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[test]
    fn out_of_range_score_is_not_clamped() {
        let payload = NORMCORE.replace("7.5", "11");
        let result = parse_analysis_payload(Some(payload)).unwrap();
        assert_eq!(11.0, result.snapshot.score);
    }
}
