use crate::analysis::prelude::{AnalysisResult, SnapshotData};
use crate::intake::prelude::UploadedImage;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoastLine {
    pub label: String,
    pub text: String,
}

/// The card meant to be screenshotted and shared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotCard {
    pub score: String,
    pub style: String,
    pub keywords: Vec<String>,
}

impl From<&SnapshotData> for SnapshotCard {
    fn from(value: &SnapshotData) -> Self {
        Self {
            score: format_score(value.score),
            style: value.style.clone(),
            keywords: value.keywords.clone(),
        }
    }
}

/// Everything shown for a finished review, ready to hand to a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub image: String,
    pub roast: Vec<RoastLine>,
    pub advice: Vec<String>,
    pub snapshot: SnapshotCard,
    pub score_comment: String,
}

impl ResultView {
    pub fn new(result: &AnalysisResult, image: &UploadedImage) -> Self {
        let roast = result
            .roast
            .iter()
            .enumerate()
            .map(|(idx, text)| RoastLine {
                label: format!("{:02}.", idx + 1),
                text: text.clone(),
            })
            .collect();

        Self {
            image: image_summary(image),
            roast,
            advice: result.advice.clone(),
            snapshot: SnapshotCard::from(&result.snapshot),
            score_comment: result.score_comment.clone(),
        }
    }
}

/// `7.5` becomes `7.5 / 10`, `8` becomes `8.0 / 10`.
pub fn format_score(score: f64) -> String {
    format!("{:.1} / 10", score)
}

pub fn format_size(size_bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let size = size_bytes as f64;
    if size >= KIB * KIB {
        format!("{:.1} MB", size / (KIB * KIB))
    } else if size >= KIB {
        format!("{:.0} KB", size / KIB)
    } else {
        format!("{} bytes", size_bytes)
    }
}

pub fn image_summary(image: &UploadedImage) -> String {
    match image.dimensions {
        Some((width, height)) => format!(
            "{} ({}, {}x{}, {})",
            image.file_name,
            image.media_type,
            width,
            height,
            format_size(image.size_bytes)
        ),
        None => format!(
            "{} ({}, {})",
            image.file_name,
            image.media_type,
            format_size(image.size_bytes)
        ),
    }
}
