//! Intent executor.
//!
//! Intents are issued strictly in plan order, one remote call each, and
//! every result is reported through [`RunContext`] as soon as it is known.
//! By default the first failure aborts the run; intents already applied
//! stay applied. [`OnError::Continue`] records the failure and moves on.
//! In dry-run mode nothing is sent and every intent reports
//! [`ApplyResult::WouldApply`].

use std::fmt;

use relay_core::{BoardId, ItemId, RecordId};

use crate::error::{RemoteError, SyncError};
use crate::intent::{BoardTarget, Intent};
use crate::pipeline::Skipped;
use crate::ports::{BoardApi, CrmApi};

// ---------------------------------------------------------------------------
// Apply result
// ---------------------------------------------------------------------------

/// Identifier handed back by a create call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedId {
    Record(RecordId),
    Board(BoardId),
    Item(ItemId),
}

impl fmt::Display for CreatedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatedId::Record(id) => id.fmt(f),
            CreatedId::Board(id) => id.fmt(f),
            CreatedId::Item(id) => id.fmt(f),
        }
    }
}

/// Outcome of an individual intent.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyResult {
    /// A record, board or item was created.
    Created { intent: Intent, id: CreatedId },
    /// An existing record or item was changed. `acknowledged` is the
    /// server's own success flag.
    Updated { intent: Intent, acknowledged: bool },
    /// A record or item was removed.
    Deleted { intent: Intent, acknowledged: bool },
    /// `--dry-run` mode: the intent *would* have been sent.
    WouldApply { intent: Intent },
    /// The call failed and the run continued ([`OnError::Continue`]).
    Failed { intent: Intent, error: String },
}

impl ApplyResult {
    pub fn intent(&self) -> &Intent {
        match self {
            ApplyResult::Created { intent, .. }
            | ApplyResult::Updated { intent, .. }
            | ApplyResult::Deleted { intent, .. }
            | ApplyResult::WouldApply { intent }
            | ApplyResult::Failed { intent, .. } => intent,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ApplyResult::Failed { .. })
    }
}

impl fmt::Display for ApplyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyResult::Created { intent, id } => write!(f, "{intent} → id {id}"),
            ApplyResult::Updated { intent, acknowledged }
            | ApplyResult::Deleted { intent, acknowledged } => {
                if *acknowledged {
                    write!(f, "{intent}")
                } else {
                    write!(f, "{intent} (not acknowledged)")
                }
            }
            ApplyResult::WouldApply { intent } => write!(f, "would {intent}"),
            ApplyResult::Failed { error, .. } => f.write_str(error),
        }
    }
}

// ---------------------------------------------------------------------------
// Run context
// ---------------------------------------------------------------------------

/// One progress event, delivered while a procedure is still running.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    Applied(&'a ApplyResult),
    Skipped(&'a Skipped),
    /// Read-only output such as a formatted address.
    Line(&'a str),
}

/// What to do when a write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnError {
    /// Return the error; later intents are not sent.
    #[default]
    Abort,
    /// Record [`ApplyResult::Failed`], warn, and send the next intent.
    Continue,
}

/// Dry-run switch plus the sink progress events go to.
pub struct RunContext<'p> {
    pub dry_run: bool,
    progress: &'p mut dyn FnMut(Progress<'_>),
}

impl<'p> RunContext<'p> {
    pub fn new(dry_run: bool, progress: &'p mut dyn FnMut(Progress<'_>)) -> Self {
        Self { dry_run, progress }
    }

    pub fn emit(&mut self, event: Progress<'_>) {
        (self.progress)(event)
    }
}

impl fmt::Debug for RunContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

/// Issue `intents` in order against `board` and `crm`.
pub fn apply<B: BoardApi, C: CrmApi>(
    intents: Vec<Intent>,
    board: &B,
    crm: &C,
    ctx: &mut RunContext<'_>,
    on_error: OnError,
) -> Result<Vec<ApplyResult>, SyncError> {
    let mut created_board: Option<BoardId> = None;
    let mut results = Vec::with_capacity(intents.len());

    for intent in intents {
        let result = if ctx.dry_run {
            tracing::info!("[dry-run] would {intent}");
            ApplyResult::WouldApply { intent }
        } else {
            match apply_one(&intent, board, crm, &mut created_board) {
                Ok(outcome) => {
                    let result = outcome.into_result(intent);
                    tracing::info!("{result}");
                    result
                }
                Err(err) if on_error == OnError::Continue => {
                    tracing::warn!("{err}; continuing with the next write");
                    ApplyResult::Failed {
                        intent,
                        error: err.to_string(),
                    }
                }
                Err(err) => return Err(err),
            }
        };
        ctx.emit(Progress::Applied(&result));
        results.push(result);
    }
    Ok(results)
}

enum Outcome {
    Created(CreatedId),
    Updated(bool),
    Deleted(bool),
}

impl Outcome {
    fn into_result(self, intent: Intent) -> ApplyResult {
        match self {
            Outcome::Created(id) => ApplyResult::Created { intent, id },
            Outcome::Updated(acknowledged) => ApplyResult::Updated {
                intent,
                acknowledged,
            },
            Outcome::Deleted(acknowledged) => ApplyResult::Deleted {
                intent,
                acknowledged,
            },
        }
    }
}

fn apply_one<B: BoardApi, C: CrmApi>(
    intent: &Intent,
    board: &B,
    crm: &C,
    created_board: &mut Option<BoardId>,
) -> Result<Outcome, SyncError> {
    let fail = |source: RemoteError| SyncError::Apply {
        intent: intent.to_string(),
        source,
    };

    match intent {
        Intent::CreateRecord { model, fields } => {
            let id = crm
                .create_record(model, fields)
                .map_err(|e| fail(e.into()))?;
            Ok(Outcome::Created(CreatedId::Record(id)))
        }
        Intent::UpdateRecord { model, id, fields } => {
            let acknowledged = crm
                .update_record(model, *id, fields)
                .map_err(|e| fail(e.into()))?;
            if !acknowledged {
                tracing::warn!("server did not acknowledge: {intent}");
            }
            Ok(Outcome::Updated(acknowledged))
        }
        Intent::DeleteRecord { model, id } => {
            let acknowledged = crm
                .delete_record(model, *id)
                .map_err(|e| fail(e.into()))?;
            if !acknowledged {
                tracing::warn!("server did not acknowledge: {intent}");
            }
            Ok(Outcome::Deleted(acknowledged))
        }
        Intent::CreateBoard { name } => {
            let id = board.create_board(name).map_err(|e| fail(e.into()))?;
            *created_board = Some(id);
            Ok(Outcome::Created(CreatedId::Board(id)))
        }
        Intent::CreateItem {
            board: target,
            name,
            column_values,
        } => {
            let board_id = match target {
                BoardTarget::Existing(id) => *id,
                BoardTarget::Created => created_board.ok_or_else(|| {
                    SyncError::Plan(format!(
                        "cannot {intent}: no board was created earlier in the plan"
                    ))
                })?,
            };
            let id = board
                .create_item(board_id, name, column_values)
                .map_err(|e| fail(e.into()))?;
            Ok(Outcome::Created(CreatedId::Item(id)))
        }
        Intent::DeleteItem { id } => {
            board.delete_item(*id).map_err(|e| fail(e.into()))?;
            Ok(Outcome::Deleted(true))
        }
        Intent::ChangeColumnValue {
            board: board_id,
            item,
            column,
            value,
        } => {
            board
                .change_column_value(*board_id, *item, column, value)
                .map_err(|e| fail(e.into()))?;
            Ok(Outcome::Updated(true))
        }
    }
}
