//! Directory discovery for persona config.
//!
//! On Unix-like systems the XDG Base Directory layout is used even on macOS,
//! which is why this does not lean on `dirs`/`directories`.

use std::path::{Path, PathBuf};

/// Get the user's home directory.
pub fn home() -> Option<PathBuf> {
    std::env::home_dir()
}

/// Get the user's configuration directory: `$XDG_CONFIG_HOME` if set and not empty,
/// otherwise `~/.config`.
///
/// ```
/// # use kaopei::shared::directories::config;
/// if let Some(config_dir) = config() {
///     println!("Config directory: {}", config_dir.display());
/// }
/// ```
pub fn config() -> Option<PathBuf> {
    let xdg_config_home = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    config_with(xdg_config_home.as_deref(), home().as_deref())
}

pub(crate) fn config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Some(xdg.to_path_buf());
    }

    home.map(|home| home.join(".config"))
}
