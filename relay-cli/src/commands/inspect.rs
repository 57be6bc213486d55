//! `relay inspect`: read-only views used when editing the settings.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use relay_core::BoardId;
use relay_monday::MondayClient;

use super::{home, load_settings, odoo_login, setup};

#[derive(Subcommand, Debug)]
pub enum InspectCommand {
    /// List the boards the API key can see.
    Boards {
        #[arg(long)]
        json: bool,
    },

    /// List the columns of a board (defaults to monday.board_id).
    Columns {
        board: Option<u64>,
        #[arg(long)]
        json: bool,
    },

    /// List the fields of an Odoo model (defaults to odoo.applicant_model).
    Fields {
        model: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Tabled, Serialize)]
struct BoardRow {
    id: u64,
    name: String,
}

#[derive(Tabled, Serialize)]
struct ColumnRow {
    id: String,
    title: String,
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    field: String,
    label: String,
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    kind: String,
}

pub fn run(command: InspectCommand) -> Result<()> {
    let home = home()?;
    let settings = load_settings(&home)?;
    let secrets = setup::load_or_prompt(&home)?;
    let monday = MondayClient::new(settings.monday.api_url.as_str());

    match command {
        InspectCommand::Boards { json } => {
            let rows: Vec<BoardRow> = monday
                .list_boards(&secrets.monday_api_key)
                .context("failed to list boards")?
                .into_iter()
                .map(|b| BoardRow {
                    id: b.id.0,
                    name: b.name,
                })
                .collect();
            print_rows(rows, json)
        }
        InspectCommand::Columns { board, json } => {
            let board = board.map(BoardId).unwrap_or(settings.monday.board_id);
            let rows: Vec<ColumnRow> = monday
                .board_columns(&secrets.monday_api_key, board)
                .with_context(|| format!("failed to list columns of board {board}"))?
                .into_iter()
                .map(|c| ColumnRow {
                    id: c.id,
                    title: c.title,
                })
                .collect();
            print_rows(rows, json)
        }
        InspectCommand::Fields { model, json } => {
            let model = model.unwrap_or_else(|| settings.odoo.applicant_model.clone());
            let session = odoo_login(&settings, &secrets)?;
            let rows: Vec<FieldRow> = session
                .fields_get(&model)
                .with_context(|| format!("failed to list fields of {model}"))?
                .into_iter()
                .map(|(field, info)| FieldRow {
                    field,
                    label: info.label,
                    kind: info.kind,
                })
                .collect();
            print_rows(rows, json)
        }
    }
}

fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("Nothing to show.");
        return Ok(());
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}
