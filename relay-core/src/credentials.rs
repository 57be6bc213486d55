//! Plaintext credential store.
//!
//! Three secrets live in a `KEY=value` file (by default
//! `~/.relay/secrets.env`). The file is written once by the interactive
//! setup and read on every run. There is no encryption; the file is created
//! owner-only on unix.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{credential_io, CredentialError};
use crate::fsutil;
use crate::paths;

pub const MONDAY_API_KEY_KEY: &str = "MONDAY_API_KEY";
pub const ODOO_USERNAME_KEY: &str = "ODOO_USERNAME";
pub const ODOO_PASSWORD_KEY: &str = "ODOO_PASSWORD";

/// The board-tool API key and the CRM login.
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    pub monday_api_key: String,
    pub odoo_username: String,
    pub odoo_password: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("monday_api_key", &"<redacted>")
            .field("odoo_username", &"<redacted>")
            .field("odoo_password", &"<redacted>")
            .finish()
    }
}

/// Handle on a secrets file at a fixed path.
#[derive(Debug, Clone)]
pub struct SecretStore {
    path: PathBuf,
}

impl SecretStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<home>/.relay/secrets.env`
    pub fn default_at(home: &Path) -> Self {
        Self::at(paths::secrets_path(home))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether secrets were saved before. `false` means: prompt.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write all three secrets, replacing any previous file.
    pub fn save(&self, secrets: &Secrets) -> Result<(), CredentialError> {
        let contents = format!(
            "{MONDAY_API_KEY_KEY}={}\n{ODOO_USERNAME_KEY}={}\n{ODOO_PASSWORD_KEY}={}\n",
            secrets.monday_api_key, secrets.odoo_username, secrets.odoo_password
        );
        fsutil::write_private(&self.path, &contents).map_err(|e| credential_io(&self.path, e))
    }

    pub fn load(&self) -> Result<Secrets, CredentialError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CredentialError::NotFound {
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(credential_io(&self.path, e)),
        };
        let pairs = parse_pairs(&contents);
        let lookup = |key: &'static str| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
                .ok_or_else(|| CredentialError::MissingKey {
                    key,
                    path: self.path.clone(),
                })
        };
        Ok(Secrets {
            monday_api_key: lookup(MONDAY_API_KEY_KEY)?,
            odoo_username: lookup(ODOO_USERNAME_KEY)?,
            odoo_password: lookup(ODOO_PASSWORD_KEY)?,
        })
    }
}

/// `KEY=value` lines; blank lines and `#` comments skipped, one layer of
/// matching quotes stripped from the value. Later duplicates win.
fn parse_pairs(contents: &str) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim().trim_start_matches("export ").trim();
        let value = unquote(value.trim());
        pairs.retain(|(k, _)| *k != key);
        pairs.push((key, value));
    }
    pairs
}

fn unquote(value: &str) -> &str {
    for q in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(q) && value.ends_with(q) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
