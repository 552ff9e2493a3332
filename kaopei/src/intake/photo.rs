use super::error::IntakeError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, ImageReader};
use infer::MatcherType;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest photo accepted, checked before anything is read.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// A photo the user picked, not yet read.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

impl ImageFile {
    pub async fn open(path: &Path) -> Result<Self, IntakeError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| IntakeError::Io {
                file_name: path.display().to_string(),
                source,
            })?;

        if !metadata.is_file() {
            return Err(IntakeError::DecodeFailure {
                file_name: path.display().to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            size_bytes: metadata.len(),
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// A validated photo held in memory as a self-describing data URI.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedImage {
    pub data_uri: String,
    pub media_type: String,
    pub size_bytes: u64,
    pub file_name: String,
    /// Width and height, when the header is one `image` can read. HEIC and AVIF
    /// photos are accepted without them.
    pub dimensions: Option<(u32, u32)>,
}

pub async fn validate_and_decode(file: &ImageFile) -> Result<UploadedImage, IntakeError> {
    if file.size_bytes > MAX_IMAGE_BYTES {
        return Err(IntakeError::SizeExceeded {
            limit: MAX_IMAGE_BYTES,
            actual: file.size_bytes,
        });
    }

    let file_name = file.file_name();
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|source| IntakeError::Io {
            file_name: file_name.clone(),
            source,
        })?;

    // The file may have grown between open and read.
    if bytes.len() as u64 > MAX_IMAGE_BYTES {
        return Err(IntakeError::SizeExceeded {
            limit: MAX_IMAGE_BYTES,
            actual: bytes.len() as u64,
        });
    }

    let (media_type, dimensions) = sniff_image(&bytes).ok_or_else(|| IntakeError::DecodeFailure {
        file_name: file_name.clone(),
    })?;
    debug!("Detected {} as {} {:?}", file_name, media_type, dimensions);

    let data_uri = format!("data:{};base64,{}", media_type, STANDARD.encode(&bytes));

    Ok(UploadedImage {
        data_uri,
        media_type,
        size_bytes: bytes.len() as u64,
        file_name,
        dimensions,
    })
}

/// Media type from the magic bytes, dimensions from the header when readable.
/// Content without a known image signature is only accepted when `image` can
/// read its header.
fn sniff_image(bytes: &[u8]) -> Option<(String, Option<(u32, u32)>)> {
    let header = read_header(bytes);
    let signature = infer::get(bytes).filter(|kind| kind.matcher_type() == MatcherType::Image);

    match (signature, header) {
        (Some(kind), header) => Some((
            kind.mime_type().to_string(),
            header.map(|(_, dimensions)| dimensions),
        )),
        (None, Some((format, dimensions))) => {
            Some((format.to_mime_type().to_string(), Some(dimensions)))
        }
        (None, None) => None,
    }
}

fn read_header(bytes: &[u8]) -> Option<(ImageFormat, (u32, u32))> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let format = reader.format()?;
    let dimensions = reader.into_dimensions().ok()?;

    Some((format, dimensions))
}
