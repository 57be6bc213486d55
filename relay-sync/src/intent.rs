//! Write intents: what a procedure wants done, before anything is sent.

use std::collections::BTreeMap;
use std::fmt;

use relay_core::{BoardId, FieldMap, ItemId, RecordId};

/// Which board a new item goes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardTarget {
    Existing(BoardId),
    /// The board created by the most recent `CreateBoard` in the same plan.
    Created,
}

/// One write against either system.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    CreateRecord {
        model: String,
        fields: FieldMap,
    },
    UpdateRecord {
        model: String,
        id: RecordId,
        fields: FieldMap,
    },
    DeleteRecord {
        model: String,
        id: RecordId,
    },
    CreateBoard {
        name: String,
    },
    CreateItem {
        board: BoardTarget,
        name: String,
        /// Column id → value; empty for a name-only item.
        column_values: BTreeMap<String, String>,
    },
    DeleteItem {
        id: ItemId,
    },
    ChangeColumnValue {
        board: BoardId,
        item: ItemId,
        column: String,
        value: String,
    },
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::CreateRecord { model, fields } => {
                write!(f, "create {model} record {}", FieldsDisplay(fields))
            }
            Intent::UpdateRecord { model, id, fields } => {
                write!(f, "update {model} #{id} with {}", FieldsDisplay(fields))
            }
            Intent::DeleteRecord { model, id } => write!(f, "delete {model} #{id}"),
            Intent::CreateBoard { name } => write!(f, "create board '{name}'"),
            Intent::CreateItem { board, name, .. } => match board {
                BoardTarget::Existing(id) => write!(f, "create item '{name}' on board {id}"),
                BoardTarget::Created => write!(f, "create item '{name}' on the new board"),
            },
            Intent::DeleteItem { id } => write!(f, "delete board item {id}"),
            Intent::ChangeColumnValue {
                board,
                item,
                column,
                value,
            } => write!(f, "set {column}='{value}' on item {item} of board {board}"),
        }
    }
}

struct FieldsDisplay<'a>(&'a FieldMap);

impl fmt::Display for FieldsDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}: {v}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_fields_in_key_order() {
        let mut fields = FieldMap::new();
        fields.insert("stage_id".into(), 1i64.into());
        fields.insert("partner_name".into(), "Ana".into());
        let intent = Intent::CreateRecord {
            model: "hr.applicant".into(),
            fields,
        };
        assert_eq!(
            intent.to_string(),
            "create hr.applicant record {partner_name: Ana, stage_id: 1}"
        );
    }

    #[test]
    fn board_item_delete_names_the_item() {
        let intent = Intent::DeleteItem { id: ItemId(5) };
        assert_eq!(intent.to_string(), "delete board item 5");
    }
}
