//! Board items with one given name become CRM applicants.
//!
//! No duplicate check: running twice creates the records twice.

use relay_core::{BoardItem, FieldMap, Settings};

use crate::error::SyncError;
use crate::executor::{self, OnError, RunContext};
use crate::intent::Intent;
use crate::pipeline::ProcedureReport;
use crate::ports::{BoardApi, CrmApi};

/// `name` of every applicant this procedure creates.
pub const NEW_APPLICANT_NAME: &str = "New Applicant!";

/// One `CreateRecord` per item named exactly `wanted`, in board order.
pub fn plan(model: &str, items: &[BoardItem], wanted: &str) -> Vec<Intent> {
    items
        .iter()
        .filter(|item| item.name == wanted)
        .map(|item| {
            let mut fields = FieldMap::new();
            fields.insert("partner_name".into(), item.name.as_str().into());
            fields.insert("name".into(), NEW_APPLICANT_NAME.into());
            Intent::CreateRecord {
                model: model.to_string(),
                fields,
            }
        })
        .collect()
}

pub fn run<B: BoardApi, C: CrmApi>(
    settings: &Settings,
    board: &B,
    crm: &C,
    ctx: &mut RunContext<'_>,
) -> Result<ProcedureReport, SyncError> {
    let items = board
        .read_items_and_names(settings.monday.board_id)
        .map_err(SyncError::BoardFetch)?;

    let wanted = &settings.procedures.selective_create.name;
    let intents = plan(&settings.odoo.applicant_model, &items, wanted);
    if intents.is_empty() {
        tracing::info!("no board item named '{wanted}'");
    }

    let mut report = ProcedureReport::new("create-selected");
    report.results = executor::apply(intents, board, crm, ctx, OnError::Abort)?;
    Ok(report)
}
