use colored::Colorize;

use crate::models::HelpMetadata;
use std::cmp::max;
use std::path::Path;
use tracing::info;

mod config_load;
pub mod directories;
mod logging;
mod models;

pub const RUN_ID_ENV_VAR: &str = "KAOPEI_RUN_ID";
pub const CONFIG_DIR_NAME: &str = ".kaopei";

pub mod prelude {
    pub use super::config_load::{ConfigOptions, FoundConfig, build_config_path};
    pub use super::logging::{LoggingOpts, LoggingProgress, progress_bar_without_pos};
    pub use super::models::prelude::*;
    pub use super::print_details;
    pub use super::{CONFIG_DIR_NAME, RUN_ID_ENV_VAR};
}

pub fn print_details<T>(working_dir: &Path, config: &[T])
where
    T: HelpMetadata,
{
    let max_name_length = config
        .iter()
        .map(|x| x.full_name().len())
        .max()
        .unwrap_or(20);
    let max_name_length = max(max_name_length, 20) + 2;

    info!(target: "user", "  {:max_name_length$}{:60}{}", "Name".white().bold(), "Description".white().bold(), "Path".white().bold());
    for resource in config {
        let mut description = resource.description();
        if description.len() > 55 {
            let cut = (0..=55)
                .rev()
                .find(|idx| description.is_char_boundary(*idx))
                .unwrap_or(0);
            description.truncate(cut);
            description = format!("{}...", description);
        }

        let mut loc = resource.metadata().file_path();
        let diff_path = pathdiff::diff_paths(&loc, working_dir);
        if let Some(diff) = diff_path {
            loc = diff.display().to_string();
        } else if loc.len() > 35 {
            loc = format!("...{}", loc.split_off(loc.len() - 35));
        }

        info!(target: "user", "- {:max_name_length$}{:60}{}", resource.full_name(), description, loc);
    }
}
