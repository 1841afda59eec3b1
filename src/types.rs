use std::fmt;

/// Values that can be stored in a database row or used as query parameters.
///
/// ```rust
/// use sqlite_txn::prelude::*;
///
/// let params = vec![RowValues::Text("John".into()), RowValues::Int(30)];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value, stored as 0/1
    Bool(bool),
    /// NULL value
    Null,
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }
}

/// Whether a connection currently has an open transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxState {
    #[default]
    Idle,
    InTransaction,
}

impl TxState {
    #[must_use]
    pub fn is_in_transaction(self) -> bool {
        matches!(self, TxState::InTransaction)
    }
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxState::Idle => f.write_str("idle"),
            TxState::InTransaction => f.write_str("in transaction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_only_match_their_variant() {
        assert_eq!(RowValues::Int(30).as_int(), Some(&30));
        assert_eq!(RowValues::Text("30".into()).as_int(), None);
        assert_eq!(RowValues::Null.as_text(), None);
    }

    #[test]
    fn tx_state_defaults_to_idle() {
        assert_eq!(TxState::default(), TxState::Idle);
        assert!(!TxState::Idle.is_in_transaction());
        assert_eq!(TxState::InTransaction.to_string(), "in transaction");
    }
}
