mod client;
mod error;
mod gemini;
mod provider;
mod request;
mod result;
mod schema;

pub use schema::{RESPONSE_SCHEMA_VERSION, response_schema};

pub mod prelude {
    pub use super::client::{AnalysisClient, parse_analysis_payload};
    pub use super::error::{AnalysisError, SERVICE_FAILURE_MESSAGE};
    pub use super::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiProvider};
    pub use super::provider::{AnalysisProvider, MockAnalysisProvider};
    pub use super::request::{AnalysisRequest, TEMPERATURE, strip_data_uri_prefix};
    pub use super::result::{AnalysisResult, SnapshotData};
    pub use super::schema::{RESPONSE_SCHEMA_VERSION, response_schema};
}
