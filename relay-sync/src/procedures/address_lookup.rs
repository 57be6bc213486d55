//! Print the address fields of employees with a given name. Read-only.

use relay_core::Settings;
use relay_odoo::NameFilter;

use crate::error::SyncError;
use crate::executor::{Progress, RunContext};
use crate::pipeline::ProcedureReport;
use crate::ports::CrmApi;
use crate::record::CrmRow;

/// `fields` of `row` joined with `", "`; unset parts are empty strings.
pub fn format_address(row: &CrmRow, fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| row.text(f))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run<C: CrmApi>(
    settings: &Settings,
    crm: &C,
    ctx: &mut RunContext<'_>,
) -> Result<ProcedureReport, SyncError> {
    let addresses = &settings.procedures.addresses;
    let filter = NameFilter::exact("name", addresses.name.as_str());
    let rows: Vec<CrmRow> = crm
        .read_fields(&settings.odoo.employee_model, &addresses.fields, Some(&filter))
        .map_err(SyncError::CrmFetch)?;

    let mut report = ProcedureReport::new("addresses");
    for row in &rows {
        let line = format_address(row, &addresses.fields);
        ctx.emit(Progress::Line(&line));
        report.lines.push(line);
    }
    if report.lines.is_empty() {
        tracing::info!("no employee named '{}'", addresses.name);
    }
    Ok(report)
}
