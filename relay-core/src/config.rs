//! Settings: endpoints, model names and the per-procedure literals.
//!
//! # API pattern
//!
//! Like every store in this crate, each function has two forms:
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! A missing settings file is not an error: [`Settings::default`] carries
//! the values the integration was first written against. Every section is
//! `#[serde(default)]`, so a file only needs the keys it overrides.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{config_io, ConfigError};
use crate::fsutil;
use crate::paths;
use crate::stage::StageTable;
use crate::types::{BoardId, ItemId};

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Board-tool endpoint and the board the procedures operate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MondaySettings {
    pub api_url: String,
    pub board_id: BoardId,
    /// Column holding the applicant status text.
    pub status_column: String,
}

impl Default for MondaySettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.monday.com/v2".into(),
            board_id: BoardId(5990805927),
            status_column: "status".into(),
        }
    }
}

/// CRM endpoint, database and the models the procedures touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdooSettings {
    pub url: String,
    pub database: String,
    pub applicant_model: String,
    pub employee_model: String,
}

impl Default for OdooSettings {
    fn default() -> Self {
        Self {
            url: "https://citrus2.odoo.com".into(),
            database: "citrus2".into(),
            applicant_model: "hr.applicant".into(),
            employee_model: "hr.employee".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectiveCreateSettings {
    /// Only board items with exactly this name are copied.
    pub name: String,
}

impl Default for SelectiveCreateSettings {
    fn default() -> Self {
        Self {
            name: "Chaves".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub board_name: String,
    pub fields: Vec<String>,
    /// CRM field → board column id. Empty means items carry only a name.
    pub column_mapping: BTreeMap<String, String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            board_name: "Employees from Odoo".into(),
            fields: ["name", "work_email", "job_id", "department_id"]
                .map(String::from)
                .to_vec(),
            column_mapping: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressSettings {
    pub name: String,
    pub fields: Vec<String>,
}

impl Default for AddressSettings {
    fn default() -> Self {
        Self {
            name: "Andy".into(),
            fields: ["private_street", "private_city", "private_zip"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkDeleteSettings {
    /// Board items removed before the CRM wipe, in this order.
    pub board_items: Vec<ItemId>,
}

impl Default for BulkDeleteSettings {
    fn default() -> Self {
        Self {
            board_items: vec![ItemId(6076917957), ItemId(6076918096)],
        }
    }
}

/// Literals each procedure works from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureSettings {
    pub selective_create: SelectiveCreateSettings,
    pub export: ExportSettings,
    pub addresses: AddressSettings,
    pub bulk_delete: BulkDeleteSettings,
}

/// Root of `~/.relay/config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub monday: MondaySettings,
    pub odoo: OdooSettings,
    pub status_stages: StageTable,
    pub procedures: ProcedureSettings,
}

impl Settings {
    /// Reject values neither client can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("monday.api_url", &self.monday.api_url)?;
        check_url("odoo.url", &self.odoo.url)?;
        if self.monday.board_id.0 == 0 {
            return Err(invalid("monday.board_id", "must be a non-zero board id"));
        }
        non_empty("monday.status_column", &self.monday.status_column)?;
        non_empty("odoo.database", &self.odoo.database)?;
        non_empty("odoo.applicant_model", &self.odoo.applicant_model)?;
        non_empty("odoo.employee_model", &self.odoo.employee_model)?;
        if self.status_stages.is_empty() {
            return Err(invalid("status_stages", "at least one status is required"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(invalid(
            field,
            format!("'{value}' is not an http(s) URL"),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Load and validate `<home>/.relay/config.yaml`, falling back to defaults.
pub fn load_at(home: &Path) -> Result<Settings, ConfigError> {
    let path = paths::settings_path(home);
    let settings = if path.exists() {
        load_file(&path)?
    } else {
        Settings::default()
    };
    settings.validate()?;
    Ok(settings)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Settings, ConfigError> {
    load_at(&home()?)
}

/// Parse a settings file at an arbitrary path without validating it.
pub fn load_file(path: &Path) -> Result<Settings, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| config_io(path, e))?;
    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Atomically write `settings` to `<home>/.relay/config.yaml`.
pub fn save_at(home: &Path, settings: &Settings) -> Result<PathBuf, ConfigError> {
    let path = paths::settings_path(home);
    let yaml = serde_yaml::to_string(settings)?;
    fsutil::write_private(&path, &yaml).map_err(|e| config_io(&path, e))?;
    Ok(path)
}

/// `save_at` convenience wrapper.
pub fn save(settings: &Settings) -> Result<PathBuf, ConfigError> {
    save_at(&home()?, settings)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        Settings::default().validate().expect("defaults validate");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let home = TempDir::new().unwrap();
        let settings = load_at(home.path()).expect("load");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let home = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.monday.board_id = BoardId(77);
        settings.procedures.selective_create.name = "Bob".into();
        save_at(home.path(), &settings).expect("save");
        assert_eq!(load_at(home.path()).expect("load"), settings);
    }

    #[test]
    fn zero_board_id_is_rejected() {
        let mut settings = Settings::default();
        settings.monday.board_id = BoardId(0);
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("monday.board_id"), "got: {err}");
    }

    #[test]
    fn non_http_url_is_rejected() {
        let mut settings = Settings::default();
        settings.odoo.url = "citrus2.odoo.com".into();
        let err = settings.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "odoo.url", .. }));
    }

    #[test]
    fn empty_stage_table_is_rejected() {
        let mut settings = Settings::default();
        settings.status_stages = StageTable::new(vec![]);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn home_not_found_error_message() {
        assert!(ConfigError::HomeNotFound.to_string().contains("home directory"));
    }
}
