//! Board status column → CRM applicant stage.
//!
//! Items whose status has no entry in the stage table are skipped with a
//! warning. Every applicant whose `partner_name` equals the item name is
//! updated; names are not unique, so one item may update several records.

use relay_core::{BoardItem, FieldMap, RecordId, Settings, StageId, StageTable};
use relay_odoo::NameFilter;

use crate::error::SyncError;
use crate::executor::{self, OnError, Progress, RunContext};
use crate::intent::Intent;
use crate::pipeline::{ProcedureReport, Skipped};
use crate::ports::{BoardApi, CrmApi};

/// Status reported for an item whose status column is empty or missing.
pub const STATUS_NOT_FOUND: &str = "Status not found";

/// `name` written on every applicant this procedure touches.
pub const UPDATED_NAME: &str = "Updated Status!";

/// A board item whose status maps to a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMatch {
    pub name: String,
    pub stage: StageId,
}

/// The stage `item`'s status maps to, or the skip to report for it.
pub fn classify(item: &BoardItem, table: &StageTable) -> Result<StatusMatch, Skipped> {
    let status = item.first_column_text().unwrap_or(STATUS_NOT_FOUND);
    match table.stage_for(status) {
        Some(stage) => Ok(StatusMatch {
            name: item.name.clone(),
            stage,
        }),
        None => Err(Skipped {
            name: item.name.clone(),
            status: status.to_string(),
        }),
    }
}

/// Fields written for `matched`, identical for create and update.
pub fn payload(matched: &StatusMatch) -> FieldMap {
    let mut fields = FieldMap::new();
    fields.insert("partner_name".into(), matched.name.as_str().into());
    fields.insert("name".into(), UPDATED_NAME.into());
    fields.insert("stage_id".into(), matched.stage.into());
    fields
}

/// One create when `existing` is empty, else one update per id.
pub fn plan_status_sync(model: &str, matched: &StatusMatch, existing: &[RecordId]) -> Vec<Intent> {
    let fields = payload(matched);
    if existing.is_empty() {
        return vec![Intent::CreateRecord {
            model: model.to_string(),
            fields,
        }];
    }
    existing
        .iter()
        .map(|id| Intent::UpdateRecord {
            model: model.to_string(),
            id: *id,
            fields: fields.clone(),
        })
        .collect()
}

/// Items are handled one after another in board order: classify, lookup,
/// plan, write. A later item therefore sees the records an earlier one
/// created, and skips are reported where they occur.
pub fn run<B: BoardApi, C: CrmApi>(
    settings: &Settings,
    board: &B,
    crm: &C,
    ctx: &mut RunContext<'_>,
) -> Result<ProcedureReport, SyncError> {
    let items = board
        .read_items_with_column(settings.monday.board_id, &settings.monday.status_column)
        .map_err(SyncError::BoardFetch)?;

    let model = &settings.odoo.applicant_model;
    let mut report = ProcedureReport::new("sync-status");
    for item in &items {
        let m = match classify(item, &settings.status_stages) {
            Ok(m) => m,
            Err(skip) => {
                tracing::warn!("{skip} (item '{}')", skip.name);
                ctx.emit(Progress::Skipped(&skip));
                report.skipped.push(skip);
                continue;
            }
        };
        let filter = NameFilter::exact("partner_name", m.name.as_str());
        let existing = crm
            .read_ids(model, Some(&filter))
            .map_err(SyncError::CrmFetch)?;
        let intents = plan_status_sync(model, &m, &existing);
        report
            .results
            .extend(executor::apply(intents, board, crm, ctx, OnError::Abort)?);
    }
    Ok(report)
}
