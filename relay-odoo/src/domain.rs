//! Search domains: `[[field, operator, value], …]`, implicitly AND-ed.

use relay_core::FieldValue;
use serde::ser::{SerializeSeq, SerializeTuple};
use serde::{Serialize, Serializer};

/// Comparison operators used by the procedures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    /// Case-insensitive substring match.
    ILike,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::ILike => "ilike",
        }
    }
}

/// One `[field, operator, value]` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub op: Operator,
    pub value: FieldValue,
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut t = s.serialize_tuple(3)?;
        t.serialize_element(&self.field)?;
        t.serialize_element(self.op.as_str())?;
        t.serialize_element(&self.value)?;
        t.end()
    }
}

/// A conjunction of conditions. The empty domain matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain(Vec<Condition>);

impl Domain {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, op: Operator, value: impl Into<FieldValue>) -> Self {
        self.0.push(Condition {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(self.0.len()))?;
        for c in &self.0 {
            seq.serialize_element(c)?;
        }
        seq.end()
    }
}

/// Exact or partial match on one text field (usually a name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    Exact { field: String, value: String },
    Partial { field: String, value: String },
}

impl NameFilter {
    pub fn exact(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Exact {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn partial(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Partial {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<&NameFilter> for Domain {
    fn from(f: &NameFilter) -> Self {
        match f {
            NameFilter::Exact { field, value } => {
                Domain::all().with(field.as_str(), Operator::Eq, value.as_str())
            }
            NameFilter::Partial { field, value } => {
                Domain::all().with(field.as_str(), Operator::ILike, value.as_str())
            }
        }
    }
}

impl From<Option<&NameFilter>> for Domain {
    fn from(f: Option<&NameFilter>) -> Self {
        f.map(Domain::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_domain_is_empty_list() {
        assert_eq!(serde_json::to_value(Domain::all()).unwrap(), json!([]));
    }

    #[test]
    fn exact_filter_uses_equals() {
        let d = Domain::from(&NameFilter::exact("partner_name", "Ana"));
        assert_eq!(
            serde_json::to_value(d).unwrap(),
            json!([["partner_name", "=", "Ana"]])
        );
    }

    #[test]
    fn partial_filter_uses_ilike() {
        let d = Domain::from(&NameFilter::partial("name", "and"));
        assert_eq!(serde_json::to_value(d).unwrap(), json!([["name", "ilike", "and"]]));
    }

    #[test]
    fn conditions_accumulate() {
        let d = Domain::all()
            .with("active", Operator::Eq, true)
            .with("name", Operator::ILike, "an");
        assert_eq!(
            serde_json::to_value(d).unwrap(),
            json!([["active", "=", true], ["name", "ilike", "an"]])
        );
    }
}
