//! Copy fields of the applicants with a given phone number into columns of
//! one board item.

use std::collections::BTreeMap;

use relay_core::{BoardId, ItemId, Settings};
use relay_odoo::NameFilter;

use crate::error::SyncError;
use crate::executor::{self, OnError, RunContext};
use crate::intent::Intent;
use crate::pipeline::ProcedureReport;
use crate::ports::{BoardApi, CrmApi};
use crate::record::CrmRow;

/// Which applicants, which board item, which columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPushRequest {
    /// Exact `partner_phone` of the applicants to read.
    pub phone: String,
    /// Board holding `item`; `None` means the configured board.
    pub board: Option<BoardId>,
    pub item: ItemId,
    /// CRM field → board column id.
    pub mapping: BTreeMap<String, String>,
}

/// One `ChangeColumnValue` per row and mapped field, rows in read order.
///
/// Fields that are unset on a row are left out so the column keeps its
/// current value.
pub fn plan_field_push(
    board: BoardId,
    item: ItemId,
    rows: &[CrmRow],
    mapping: &BTreeMap<String, String>,
) -> Vec<Intent> {
    rows.iter()
        .flat_map(move |row| {
            mapping.iter().filter_map(move |(field, column)| {
                let value = row.text(field);
                (!value.is_empty()).then(|| Intent::ChangeColumnValue {
                    board,
                    item,
                    column: column.clone(),
                    value,
                })
            })
        })
        .collect()
}

pub fn run<B: BoardApi, C: CrmApi>(
    request: &FieldPushRequest,
    settings: &Settings,
    board: &B,
    crm: &C,
    ctx: &mut RunContext<'_>,
) -> Result<ProcedureReport, SyncError> {
    if request.mapping.is_empty() {
        return Err(SyncError::Plan("no field → column mapping given".into()));
    }
    let fields: Vec<String> = request.mapping.keys().cloned().collect();
    let filter = NameFilter::exact("partner_phone", request.phone.as_str());
    let rows: Vec<CrmRow> = crm
        .read_fields(&settings.odoo.applicant_model, &fields, Some(&filter))
        .map_err(SyncError::CrmFetch)?;
    if rows.is_empty() {
        tracing::warn!("no applicant with phone '{}'", request.phone);
    }

    let board_id = request.board.unwrap_or(settings.monday.board_id);
    let intents = plan_field_push(board_id, request.item, &rows, &request.mapping);
    let mut report = ProcedureReport::new("push-fields");
    report.results = executor::apply(intents, board, crm, ctx, OnError::Abort)?;
    Ok(report)
}
