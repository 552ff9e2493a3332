use thiserror::Error;

/// The only text shown to the user when the director could not review a photo.
pub const SERVICE_FAILURE_MESSAGE: &str = "The AI director refused to review this photo. Maybe the server is busy, or your outfit scared the cloud. Please try again.";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No API key provided, set GEMINI_API_KEY or pass --api-key")]
    MissingCredential,
    #[error("Unable to reach the analysis service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Analysis service answered {status}: {body}")]
    ServiceStatus { status: u16, body: String },
    #[error("Analysis service returned no text")]
    EmptyResponse,
    #[error("Analysis service returned an unusable result: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Every kind is presented to the user the same way.
    pub fn user_message(&self) -> &'static str {
        SERVICE_FAILURE_MESSAGE
    }
}
