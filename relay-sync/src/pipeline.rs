//! Shared procedure entrypoint used by the CLI.

use std::fmt;

use relay_core::Settings;

use crate::error::SyncError;
use crate::executor::{ApplyResult, RunContext};
use crate::ports::{BoardApi, CrmApi};
use crate::procedures::{
    address_lookup, bulk_delete, bulk_export, field_push, selective_create, status_sync,
    FieldPushRequest,
};

/// The reconciliation procedures, by what they do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Procedure {
    /// Board items with the configured name become CRM applicants.
    SelectiveCreate,
    /// Board status column → applicant stage.
    StatusSync,
    /// Every employee becomes an item on a new board.
    BulkExport,
    /// Print the address fields of employees with the configured name.
    AddressLookup,
    /// Delete the configured board items, then every applicant.
    BulkDelete,
    /// Copy applicant fields into columns of one board item.
    FieldPush(FieldPushRequest),
}

impl Procedure {
    /// Command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            Procedure::SelectiveCreate => "create-selected",
            Procedure::StatusSync => "sync-status",
            Procedure::BulkExport => "export-employees",
            Procedure::AddressLookup => "addresses",
            Procedure::BulkDelete => "wipe",
            Procedure::FieldPush(_) => "push-fields",
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A board item whose status has no stage; nothing was written for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub name: String,
    pub status: String,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No stage ID found for status '{}'. Skipping...",
            self.status
        )
    }
}

/// What one procedure run did.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureReport {
    pub procedure: &'static str,
    /// One entry per issued (or, in dry-run, planned) write.
    pub results: Vec<ApplyResult>,
    pub skipped: Vec<Skipped>,
    /// Read-only output such as formatted addresses.
    pub lines: Vec<String>,
}

impl ProcedureReport {
    pub fn new(procedure: &'static str) -> Self {
        Self {
            procedure,
            results: Vec::new(),
            skipped: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Number of writes issued or planned, failed ones included.
    pub fn writes(&self) -> usize {
        self.results.len()
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }
}

/// Run `procedure` with `settings` against the two ports.
///
/// Progress goes to `ctx` while the procedure runs, so writes issued before
/// a failure are still reported. With `ctx.dry_run` set, reads still happen
/// but no write reaches either system.
pub fn run<B: BoardApi, C: CrmApi>(
    procedure: &Procedure,
    settings: &Settings,
    board: &B,
    crm: &C,
    ctx: &mut RunContext<'_>,
) -> Result<ProcedureReport, SyncError> {
    tracing::info!("running {procedure} (dry_run={})", ctx.dry_run);
    match procedure {
        Procedure::SelectiveCreate => selective_create::run(settings, board, crm, ctx),
        Procedure::StatusSync => status_sync::run(settings, board, crm, ctx),
        Procedure::BulkExport => bulk_export::run(settings, board, crm, ctx),
        Procedure::AddressLookup => address_lookup::run(settings, crm, ctx),
        Procedure::BulkDelete => bulk_delete::run(settings, board, crm, ctx),
        Procedure::FieldPush(request) => field_push::run(request, settings, board, crm, ctx),
    }
}
