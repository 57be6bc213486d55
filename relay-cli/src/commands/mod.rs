//! One module per subcommand, plus the startup helpers they share.

pub mod config;
pub mod inspect;
pub mod run;
pub mod setup;

use std::path::PathBuf;

use anyhow::{Context, Result};

use relay_core::{config as settings, Secrets, Settings};
use relay_monday::MondayClient;
use relay_odoo::{OdooClient, OdooSession};

pub fn home() -> Result<PathBuf> {
    dirs::home_dir().context("could not determine home directory")
}

/// Validated settings from `~/.relay/config.yaml` (or the defaults).
pub fn load_settings(home: &std::path::Path) -> Result<Settings> {
    settings::load_at(home).context("failed to load settings")
}

/// Everything a procedure needs, built once at startup.
pub struct Session {
    pub settings: Settings,
    pub secrets: Secrets,
    pub monday: MondayClient,
    pub odoo: OdooSession,
}

impl Session {
    /// Load settings, load (or prompt for) secrets, and log in to Odoo.
    pub fn open() -> Result<Self> {
        let home = home()?;
        let settings = load_settings(&home)?;
        let secrets = setup::load_or_prompt(&home)?;
        let monday = MondayClient::new(settings.monday.api_url.as_str());
        let odoo = odoo_login(&settings, &secrets)?;
        Ok(Self {
            settings,
            secrets,
            monday,
            odoo,
        })
    }
}

/// Authenticate against the configured Odoo database.
pub fn odoo_login(settings: &Settings, secrets: &Secrets) -> Result<OdooSession> {
    let client = OdooClient::new(settings.odoo.url.as_str(), settings.odoo.database.as_str());
    let session = client
        .login(&secrets.odoo_username, &secrets.odoo_password)
        .with_context(|| {
            format!(
                "failed to log in to Odoo at {} (database {})",
                client.url(),
                client.database()
            )
        })?;
    tracing::info!(uid = %session.uid(), "logged in to Odoo");
    Ok(session)
}
