//! `relay run <procedure> [--dry-run]`

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use relay_core::{BoardId, ItemId};
use relay_sync::procedures::FieldPushRequest;
use relay_sync::{
    pipeline, ApplyResult, MondayBoard, Procedure, ProcedureReport, Progress, RunContext,
};

use super::Session;

/// Arguments for `relay run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(subcommand)]
    pub procedure: ProcedureCommand,

    /// Read as usual but only report the writes that would be issued.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum ProcedureCommand {
    /// Create an Odoo applicant for every board item with the configured name.
    CreateSelected,

    /// Map each item's status to an applicant stage; create or update applicants.
    SyncStatus,

    /// Create a board with one item per Odoo employee.
    ExportEmployees,

    /// Print the address of every employee with the configured name.
    Addresses,

    /// Delete the configured board items, then every Odoo applicant.
    Wipe,

    /// Copy fields of the applicants with a phone number into a board item.
    PushFields(PushFieldsArgs),
}

#[derive(Args, Debug)]
pub struct PushFieldsArgs {
    /// Exact `partner_phone` of the applicants to copy from.
    #[arg(long)]
    pub phone: String,

    /// Board item receiving the values.
    #[arg(long)]
    pub item: u64,

    /// Board holding the item (defaults to monday.board_id).
    #[arg(long)]
    pub board: Option<u64>,

    /// `<odoo field>=<column id>`; repeat for several columns.
    #[arg(long = "map", value_name = "FIELD=COLUMN", required = true, value_parser = parse_mapping)]
    pub mappings: Vec<(String, String)>,
}

fn parse_mapping(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, column)) if !field.trim().is_empty() && !column.trim().is_empty() => {
            Ok((field.trim().to_string(), column.trim().to_string()))
        }
        _ => Err(format!("expected FIELD=COLUMN, got '{s}'")),
    }
}

impl ProcedureCommand {
    fn into_procedure(self) -> Procedure {
        match self {
            ProcedureCommand::CreateSelected => Procedure::SelectiveCreate,
            ProcedureCommand::SyncStatus => Procedure::StatusSync,
            ProcedureCommand::ExportEmployees => Procedure::BulkExport,
            ProcedureCommand::Addresses => Procedure::AddressLookup,
            ProcedureCommand::Wipe => Procedure::BulkDelete,
            ProcedureCommand::PushFields(args) => Procedure::FieldPush(FieldPushRequest {
                phone: args.phone,
                board: args.board.map(BoardId),
                item: ItemId(args.item),
                mapping: args.mappings.into_iter().collect::<BTreeMap<_, _>>(),
            }),
        }
    }
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let dry_run = self.dry_run;
        let procedure = self.procedure.into_procedure();
        let session = Session::open()?;
        let board = MondayBoard::new(&session.monday, &session.secrets.monday_api_key);

        let prefix = if dry_run { "[dry-run] " } else { "" };
        let mut print = |event: Progress<'_>| print_event(event, prefix);
        let mut ctx = RunContext::new(dry_run, &mut print);
        let report = pipeline::run(&procedure, &session.settings, &board, &session.odoo, &mut ctx)
            .with_context(|| format!("{procedure} failed"))?;
        print_summary(&report, prefix);
        Ok(())
    }
}

/// Print one event as soon as the procedure reports it.
fn print_event(event: Progress<'_>, prefix: &str) {
    match event {
        Progress::Line(line) => println!("{line}"),
        Progress::Skipped(skip) => println!("{prefix}{} {skip}", "!".yellow()),
        Progress::Applied(result) => {
            let mark = match result {
                ApplyResult::Created { .. } => "+".green(),
                ApplyResult::Updated { .. } => "✎".cyan(),
                ApplyResult::Deleted { .. } => "-".red(),
                ApplyResult::WouldApply { .. } => "~".normal(),
                ApplyResult::Failed { .. } => "✗".red().bold(),
            };
            println!("{prefix}{mark} {result}");
        }
    }
}

fn print_summary(report: &ProcedureReport, prefix: &str) {
    let summary = format!(
        "'{}' finished ({} write(s), {} failed, {} skipped)",
        report.procedure,
        report.writes(),
        report.failures(),
        report.skipped.len()
    );
    let mark = if report.failures() > 0 {
        "!".yellow()
    } else {
        "✓".green()
    };
    println!("{prefix}{mark} {summary}");
}
