//! Delete a fixed list of board items, then every CRM applicant.
//!
//! The CRM side is not filtered: every id the unfiltered read returns is
//! deleted. A failed delete is recorded and the wipe carries on, so items
//! already gone from the board never stop the CRM side.

use relay_core::{ItemId, RecordId, Settings};

use crate::error::SyncError;
use crate::executor::{self, OnError, RunContext};
use crate::intent::Intent;
use crate::pipeline::ProcedureReport;
use crate::ports::{BoardApi, CrmApi};

/// Board deletes in list order, then CRM deletes in returned order.
pub fn plan_bulk_delete(model: &str, board_items: &[ItemId], records: &[RecordId]) -> Vec<Intent> {
    let board = board_items.iter().map(|id| Intent::DeleteItem { id: *id });
    let crm = records.iter().map(|id| Intent::DeleteRecord {
        model: model.to_string(),
        id: *id,
    });
    board.chain(crm).collect()
}

pub fn run<B: BoardApi, C: CrmApi>(
    settings: &Settings,
    board: &B,
    crm: &C,
    ctx: &mut RunContext<'_>,
) -> Result<ProcedureReport, SyncError> {
    let model = &settings.odoo.applicant_model;
    let records = crm.read_ids(model, None).map_err(SyncError::CrmFetch)?;
    let items = &settings.procedures.bulk_delete.board_items;
    tracing::info!(
        "deleting {} board item(s) and {} {model} record(s)",
        items.len(),
        records.len()
    );

    let intents = plan_bulk_delete(model, items, &records);
    let mut report = ProcedureReport::new("wipe");
    report.results = executor::apply(intents, board, crm, ctx, OnError::Continue)?;
    Ok(report)
}
