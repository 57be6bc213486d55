//! Every CRM employee becomes an item on a freshly created board.

use std::collections::BTreeMap;

use relay_core::Settings;

use crate::error::SyncError;
use crate::executor::{self, OnError, RunContext};
use crate::intent::{BoardTarget, Intent};
use crate::pipeline::ProcedureReport;
use crate::ports::{BoardApi, CrmApi};
use crate::record::CrmRow;

/// `CreateBoard` followed by one `CreateItem` per row, named after the
/// row's `name` field.
///
/// `column_mapping` (CRM field → board column id) fills the item's columns;
/// fields that are unset on a row are left out.
pub fn plan(board_name: &str, rows: &[CrmRow], column_mapping: &BTreeMap<String, String>) -> Vec<Intent> {
    let mut intents = Vec::with_capacity(rows.len() + 1);
    intents.push(Intent::CreateBoard {
        name: board_name.to_string(),
    });
    for row in rows {
        let column_values = column_mapping
            .iter()
            .filter_map(|(field, column)| {
                let text = row.text(field);
                (!text.is_empty()).then(|| (column.clone(), text))
            })
            .collect();
        intents.push(Intent::CreateItem {
            board: BoardTarget::Created,
            name: row.text("name"),
            column_values,
        });
    }
    intents
}

/// Fields to request: the configured list, the mapped fields, and `name`.
pub fn requested_fields(fields: &[String], column_mapping: &BTreeMap<String, String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(fields.len() + column_mapping.len() + 1);
    let wanted = std::iter::once("name")
        .chain(fields.iter().map(String::as_str))
        .chain(column_mapping.keys().map(String::as_str));
    for field in wanted {
        if !out.iter().any(|f| f == field) {
            out.push(field.to_string());
        }
    }
    out
}

pub fn run<B: BoardApi, C: CrmApi>(
    settings: &Settings,
    board: &B,
    crm: &C,
    ctx: &mut RunContext<'_>,
) -> Result<ProcedureReport, SyncError> {
    let export = &settings.procedures.export;
    let fields = requested_fields(&export.fields, &export.column_mapping);
    let rows: Vec<CrmRow> = crm
        .read_fields(&settings.odoo.employee_model, &fields, None)
        .map_err(SyncError::CrmFetch)?;
    tracing::info!("exporting {} employee(s) to '{}'", rows.len(), export.board_name);

    let intents = plan(&export.board_name, &rows, &export.column_mapping);
    let mut report = ProcedureReport::new("export-employees");
    report.results = executor::apply(intents, board, crm, ctx, OnError::Abort)?;
    Ok(report)
}
