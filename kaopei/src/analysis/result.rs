use serde::{Deserialize, Serialize};

/// The shareable summary of a review.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SnapshotData {
    /// 0.5 to 10.0 in 0.5 steps when the service behaves. Not clamped.
    pub score: f64,
    pub style: String,
    /// Usually three, order as returned.
    pub keywords: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub snapshot: SnapshotData,
    pub roast: Vec<String>,
    pub advice: Vec<String>,
    #[serde(rename = "scoreComment")]
    pub score_comment: String,
}
