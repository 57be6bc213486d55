//! `relay config [--init]`

use anyhow::{Context, Result};
use clap::Args;

use relay_core::{config as settings, paths, Settings};

/// Print the effective settings as YAML.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the defaults to ~/.relay/config.yaml when no file exists yet.
    #[arg(long)]
    pub init: bool,
}

impl ConfigArgs {
    pub fn run(self) -> Result<()> {
        let home = super::home()?;
        let path = paths::settings_path(&home);

        if self.init {
            if path.exists() {
                println!("Settings already exist at {}", path.display());
            } else {
                let written = settings::save_at(&home, &Settings::default())
                    .context("failed to write default settings")?;
                println!("✓ Wrote default settings to {}", written.display());
            }
        }

        let effective = super::load_settings(&home)?;
        let yaml = serde_yaml::to_string(&effective).context("failed to render settings")?;
        if !path.exists() {
            println!("# defaults (no file at {})", path.display());
        }
        print!("{yaml}");
        Ok(())
    }
}
