use serde_json::Value;

use crate::records::parse_hex_quantity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gt,
    Lt,
}

/// A `(column, op, value)` read predicate.
#[derive(Clone, Debug)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(column: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.to_string(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Eq, value)
    }

    /// Whether a serialized row satisfies this predicate. Rows missing the
    /// column never match.
    pub fn matches(&self, row: &Value) -> bool {
        let Some(actual) = row.get(&self.column) else {
            return false;
        };

        match self.op {
            FilterOp::Eq => match (numeric(actual), numeric(&self.value)) {
                (Some(lhs), Some(rhs)) => lhs == rhs,
                _ => actual == &self.value,
            },
            FilterOp::Gt => matches!(
                (numeric(actual), numeric(&self.value)),
                (Some(lhs), Some(rhs)) if lhs > rhs
            ),
            FilterOp::Lt => matches!(
                (numeric(actual), numeric(&self.value)),
                (Some(lhs), Some(rhs)) if lhs < rhs
            ),
        }
    }
}

/// Column values arrive either as JSON numbers or as `0x`-hex quantity
/// strings; both compare numerically.
pub(super) fn numeric(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) if text.starts_with("0x") => parse_hex_quantity(text).ok(),
        _ => None,
    }
}
