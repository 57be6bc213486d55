//! Well-known locations under the user's home directory.
//!
//! ```text
//! ~/.relay/
//!   config.yaml    (settings: mode 0600)
//!   secrets.env    (API key + CRM login: mode 0600)
//! ```

use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "config.yaml";
pub const SECRETS_FILE: &str = "secrets.env";

pub fn relay_root(home: &Path) -> PathBuf {
    home.join(".relay")
}

pub fn settings_path(home: &Path) -> PathBuf {
    relay_root(home).join(SETTINGS_FILE)
}

pub fn secrets_path(home: &Path) -> PathBuf {
    relay_root(home).join(SECRETS_FILE)
}
