//! Recording stand-ins for the two ports.
//!
//! Both fakes append to one shared [`CallLog`] so tests can assert the
//! order of calls across systems.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use relay_core::{BoardId, BoardItem, FieldMap, ItemId, RecordId, Settings};
use relay_monday::MondayError;
use relay_odoo::{NameFilter, OdooError};
use relay_sync::{
    pipeline, BoardApi, CrmApi, Procedure, ProcedureReport, Progress, RunContext, SyncError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ReadItems { board: BoardId },
    ReadItemsWithColumn { board: BoardId, column: String },
    CreateBoard { name: String },
    CreateItem { board: BoardId, name: String, column_values: BTreeMap<String, String> },
    DeleteItem { id: ItemId },
    ChangeColumnValue { board: BoardId, item: ItemId, column: String, value: String },
    ReadIds { model: String, filter: Option<NameFilter> },
    ReadFields { model: String, fields: Vec<String>, filter: Option<NameFilter> },
    CreateRecord { model: String, fields: FieldMap },
    UpdateRecord { model: String, id: RecordId, fields: FieldMap },
    DeleteRecord { model: String, id: RecordId },
}

impl Call {
    pub fn is_crm_write(&self) -> bool {
        matches!(
            self,
            Call::CreateRecord { .. } | Call::UpdateRecord { .. } | Call::DeleteRecord { .. }
        )
    }

    pub fn is_write(&self) -> bool {
        self.is_crm_write()
            || matches!(
                self,
                Call::CreateBoard { .. }
                    | Call::CreateItem { .. }
                    | Call::DeleteItem { .. }
                    | Call::ChangeColumnValue { .. }
            )
    }
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn writes(log: &CallLog) -> Vec<Call> {
    log.borrow().iter().filter(|c| c.is_write()).cloned().collect()
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

pub struct FakeBoard {
    pub items: Vec<BoardItem>,
    /// Answer every read with this HTTP status instead of the items.
    pub read_status: Option<u16>,
    /// Items whose delete is rejected as already gone.
    pub missing_items: Vec<ItemId>,
    log: CallLog,
    next_id: Cell<u64>,
}

impl FakeBoard {
    pub fn new(log: &CallLog, items: Vec<BoardItem>) -> Self {
        Self {
            items,
            read_status: None,
            missing_items: Vec::new(),
            log: Rc::clone(log),
            next_id: Cell::new(1000),
        }
    }

    pub fn failing_reads(mut self, code: u16) -> Self {
        self.read_status = Some(code);
        self
    }

    pub fn missing(mut self, items: &[ItemId]) -> Self {
        self.missing_items = items.to_vec();
        self
    }

    fn next(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn read(&self) -> Result<Vec<BoardItem>, MondayError> {
        match self.read_status {
            Some(code) => Err(MondayError::Status {
                code,
                body: "Internal Server Error".into(),
            }),
            None => Ok(self.items.clone()),
        }
    }
}

impl BoardApi for FakeBoard {
    fn read_items_and_names(&self, board: BoardId) -> Result<Vec<BoardItem>, MondayError> {
        self.log.borrow_mut().push(Call::ReadItems { board });
        self.read()
    }

    fn read_items_with_column(
        &self,
        board: BoardId,
        column: &str,
    ) -> Result<Vec<BoardItem>, MondayError> {
        self.log.borrow_mut().push(Call::ReadItemsWithColumn {
            board,
            column: column.to_string(),
        });
        self.read()
    }

    fn create_board(&self, name: &str) -> Result<BoardId, MondayError> {
        self.log.borrow_mut().push(Call::CreateBoard { name: name.to_string() });
        Ok(BoardId(self.next()))
    }

    fn create_item(
        &self,
        board: BoardId,
        name: &str,
        column_values: &BTreeMap<String, String>,
    ) -> Result<ItemId, MondayError> {
        self.log.borrow_mut().push(Call::CreateItem {
            board,
            name: name.to_string(),
            column_values: column_values.clone(),
        });
        Ok(ItemId(self.next()))
    }

    fn delete_item(&self, item: ItemId) -> Result<ItemId, MondayError> {
        self.log.borrow_mut().push(Call::DeleteItem { id: item });
        if self.missing_items.contains(&item) {
            return Err(MondayError::Api {
                messages: vec!["Item not found".into()],
            });
        }
        Ok(item)
    }

    fn change_column_value(
        &self,
        board: BoardId,
        item: ItemId,
        column: &str,
        value: &str,
    ) -> Result<ItemId, MondayError> {
        self.log.borrow_mut().push(Call::ChangeColumnValue {
            board,
            item,
            column: column.to_string(),
            value: value.to_string(),
        });
        Ok(item)
    }
}

// ---------------------------------------------------------------------------
// CRM
// ---------------------------------------------------------------------------

/// In-memory records per model. Creates are visible to later reads.
pub struct FakeCrm {
    records: RefCell<BTreeMap<String, Vec<Value>>>,
    /// Reject every create with an RPC error.
    pub reject_creates: bool,
    log: CallLog,
    next_id: Cell<i64>,
}

impl FakeCrm {
    pub fn new(log: &CallLog) -> Self {
        Self {
            records: RefCell::new(BTreeMap::new()),
            reject_creates: false,
            log: Rc::clone(log),
            next_id: Cell::new(100),
        }
    }

    /// Seed `model` with `rows`; each must carry an integer `id`.
    pub fn with(self, model: &str, rows: Value) -> Self {
        let rows = match rows {
            Value::Array(rows) => rows,
            other => vec![other],
        };
        self.records.borrow_mut().entry(model.to_string()).or_default().extend(rows);
        self
    }

    fn matching(&self, model: &str, filter: Option<&NameFilter>) -> Vec<Value> {
        let records = self.records.borrow();
        let Some(rows) = records.get(model) else {
            return vec![];
        };
        rows.iter()
            .filter(|row| match filter {
                None => true,
                Some(NameFilter::Exact { field, value }) => {
                    row.get(field).and_then(Value::as_str) == Some(value.as_str())
                }
                Some(NameFilter::Partial { field, value }) => row
                    .get(field)
                    .and_then(Value::as_str)
                    .is_some_and(|s| s.to_lowercase().contains(&value.to_lowercase())),
            })
            .cloned()
            .collect()
    }
}

fn record_id(row: &Value) -> RecordId {
    RecordId(row["id"].as_i64().expect("seeded rows carry an id"))
}

impl CrmApi for FakeCrm {
    fn read_ids(
        &self,
        model: &str,
        filter: Option<&NameFilter>,
    ) -> Result<Vec<RecordId>, OdooError> {
        self.log.borrow_mut().push(Call::ReadIds {
            model: model.to_string(),
            filter: filter.cloned(),
        });
        Ok(self.matching(model, filter).iter().map(record_id).collect())
    }

    fn read_fields<T: DeserializeOwned>(
        &self,
        model: &str,
        fields: &[String],
        filter: Option<&NameFilter>,
    ) -> Result<Vec<T>, OdooError> {
        self.log.borrow_mut().push(Call::ReadFields {
            model: model.to_string(),
            fields: fields.to_vec(),
            filter: filter.cloned(),
        });
        let rows: Vec<Value> = self
            .matching(model, filter)
            .into_iter()
            .map(|row| {
                let mut out = Map::new();
                out.insert("id".into(), row["id"].clone());
                for field in fields {
                    // Odoo reports unset fields as `false`.
                    out.insert(field.clone(), row.get(field).cloned().unwrap_or(json!(false)));
                }
                Value::Object(out)
            })
            .collect();
        Ok(serde_json::from_value(Value::Array(rows))?)
    }

    fn create_record(&self, model: &str, fields: &FieldMap) -> Result<RecordId, OdooError> {
        self.log.borrow_mut().push(Call::CreateRecord {
            model: model.to_string(),
            fields: fields.clone(),
        });
        if self.reject_creates {
            return Err(OdooError::Rpc {
                message: "Odoo Server Error".into(),
                detail: Some("ValidationError: rejected".into()),
            });
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let mut row = serde_json::to_value(fields)?;
        row["id"] = json!(id);
        self.records.borrow_mut().entry(model.to_string()).or_default().push(row);
        Ok(RecordId(id))
    }

    fn update_record(
        &self,
        model: &str,
        id: RecordId,
        fields: &FieldMap,
    ) -> Result<bool, OdooError> {
        self.log.borrow_mut().push(Call::UpdateRecord {
            model: model.to_string(),
            id,
            fields: fields.clone(),
        });
        Ok(true)
    }

    fn delete_record(&self, model: &str, id: RecordId) -> Result<bool, OdooError> {
        self.log.borrow_mut().push(Call::DeleteRecord {
            model: model.to_string(),
            id,
        });
        Ok(true)
    }
}

/// Board item with a single `status` column.
pub fn with_status(id: u64, name: &str, status: Option<&str>) -> BoardItem {
    BoardItem {
        column_values: vec![relay_core::ColumnValue {
            id: "status".into(),
            text: status.map(String::from),
        }],
        ..BoardItem::named(id, name)
    }
}

/// Route library `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Progress event as the CLI would print it.
pub fn describe(event: Progress<'_>) -> String {
    match event {
        Progress::Applied(result) => result.to_string(),
        Progress::Skipped(skip) => skip.to_string(),
        Progress::Line(line) => line.to_string(),
    }
}

/// Run `procedure`, collecting progress lines in the order they arrive.
pub fn run_with_progress(
    procedure: &Procedure,
    settings: &Settings,
    board: &FakeBoard,
    crm: &FakeCrm,
    dry_run: bool,
) -> (Result<ProcedureReport, SyncError>, Vec<String>) {
    let mut lines = Vec::new();
    let mut sink = |event: Progress<'_>| lines.push(describe(event));
    let mut ctx = RunContext::new(dry_run, &mut sink);
    let result = pipeline::run(procedure, settings, board, crm, &mut ctx);
    (result, lines)
}

pub fn run(
    procedure: &Procedure,
    settings: &Settings,
    board: &FakeBoard,
    crm: &FakeCrm,
    dry_run: bool,
) -> Result<ProcedureReport, SyncError> {
    run_with_progress(procedure, settings, board, crm, dry_run).0
}
