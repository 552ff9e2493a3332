mod cli;
mod error;

pub mod prelude {
    pub use super::cli::{RoastArgs, RoastExit, ServiceOptions, roast_root};
    pub use super::error::RoastError;
}
