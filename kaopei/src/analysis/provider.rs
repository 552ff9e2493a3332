use super::error::AnalysisError;
use super::request::AnalysisRequest;
use async_trait::async_trait;
use mockall::automock;

/// The external image-analysis capability.
#[automock]
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Performs exactly one call. `Ok(None)` means the service answered without any text.
    async fn generate(&self, request: &AnalysisRequest) -> Result<Option<String>, AnalysisError>;
}
