mod error;
mod photo;

pub mod prelude {
    pub use super::error::IntakeError;
    pub use super::photo::{ImageFile, MAX_IMAGE_BYTES, UploadedImage, validate_and_decode};
}
