use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error(
        "That photo is too big! Your fashion disaster doesn't need this much resolution (max {} MB, got {actual} bytes)",
        .limit / (1024 * 1024)
    )]
    SizeExceeded { limit: u64, actual: u64 },
    #[error("Unable to read {file_name} as an image, pick a JPG or PNG photo")]
    DecodeFailure { file_name: String },
    #[error("Unable to find/open {file_name}")]
    Io {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}
