//! `relay setup`: enter the three secrets and save them.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use relay_core::credentials::{MONDAY_API_KEY_KEY, ODOO_PASSWORD_KEY, ODOO_USERNAME_KEY};
use relay_core::{SecretStore, Secrets};

pub const SAVED_MESSAGE: &str = "Secrets saved. You won't be asked these again.";

/// Prompt for the monday.com API key and the Odoo login, replacing any
/// saved secrets.
#[derive(Args, Debug)]
pub struct SetupArgs {}

impl SetupArgs {
    pub fn run(self) -> Result<()> {
        let store = SecretStore::default_at(&super::home()?);
        let secrets = prompt_secrets(&mut io::stdin().lock(), &mut io::stdout())?;
        save(&store, &secrets)
    }
}

/// Saved secrets, or the interactive prompt when none were saved yet.
pub fn load_or_prompt(home: &Path) -> Result<Secrets> {
    let store = SecretStore::default_at(home);
    if store.exists() {
        return store
            .load()
            .with_context(|| format!("failed to read secrets from {}", store.path().display()));
    }
    println!("No saved secrets at {}.", store.path().display());
    let secrets = prompt_secrets(&mut io::stdin().lock(), &mut io::stdout())?;
    save(&store, &secrets)?;
    Ok(secrets)
}

fn save(store: &SecretStore, secrets: &Secrets) -> Result<()> {
    store
        .save(secrets)
        .with_context(|| format!("failed to save secrets to {}", store.path().display()))?;
    println!("{} {SAVED_MESSAGE}", "✓".green());
    Ok(())
}

pub fn prompt_secrets<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Secrets> {
    Ok(Secrets {
        monday_api_key: ask(input, output, MONDAY_API_KEY_KEY)?,
        odoo_username: ask(input, output, ODOO_USERNAME_KEY)?,
        odoo_password: ask(input, output, ODOO_PASSWORD_KEY)?,
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, key: &str) -> Result<String> {
    writeln!(output, "Enter the {}:", key.to_ascii_lowercase())?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("input ended before {key} was entered");
    }
    let value = line.trim();
    if value.is_empty() {
        bail!("{key} must not be empty");
    }
    Ok(value.to_string())
}
