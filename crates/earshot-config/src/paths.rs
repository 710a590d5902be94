//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/earshot/earshot.toml`
//! - macOS: `~/Library/Application Support/earshot/earshot.toml`
//! - Windows: `%APPDATA%\earshot\earshot.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "earshot";

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "earshot.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user configuration file (which may not exist).
pub fn user_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}
