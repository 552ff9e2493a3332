use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoastError {
    #[error("No photo given. Pass the path of a photo, or run in a terminal to pick one")]
    MissingImage,
    #[error(transparent)]
    Prompt(#[from] inquire::InquireError),
}
