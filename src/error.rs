use thiserror::Error;

use rusqlite::ErrorCode;

// SQLITE_CONSTRAINT | (12 << 8): value rejected by a STRICT column type.
const SQLITE_CONSTRAINT_DATATYPE: i32 = 3091;

#[derive(Debug, Error)]
pub enum SqlTxnError {
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    /// A wrapped statement failed; the open transaction has been rolled back.
    #[error("SQL execution error (rolled back): {source}")]
    Execution {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A wrapped statement failed and the rollback that followed failed too.
    #[error("SQL execution error: {source}; rollback also failed: {rollback}")]
    RollbackFailed {
        sql: String,
        #[source]
        source: rusqlite::Error,
        rollback: rusqlite::Error,
    },

    #[error("Transaction already in progress: {0}")]
    TransactionActive(String),

    /// The engine was no longer in a transaction; the tracked state was reset to idle.
    #[error("Transaction already ended: {0}")]
    TransactionEnded(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unexpected row shape: {0}")]
    RowShape(String),
}

/// Coarse classification of a failed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// UNIQUE, NOT NULL, CHECK, FOREIGN KEY and friends.
    Constraint,
    /// A value of the wrong type for its column or parameter.
    TypeMismatch,
    /// Syntax errors, unknown tables or columns, wrong parameter counts.
    Malformed,
    Other,
}

impl FailureKind {
    #[must_use]
    pub fn classify(err: &rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ffi_err, _) => match ffi_err.code {
                ErrorCode::ConstraintViolation
                    if ffi_err.extended_code == SQLITE_CONSTRAINT_DATATYPE =>
                {
                    FailureKind::TypeMismatch
                }
                ErrorCode::ConstraintViolation => FailureKind::Constraint,
                ErrorCode::TypeMismatch => FailureKind::TypeMismatch,
                // plain SQLITE_ERROR
                ErrorCode::Unknown => FailureKind::Malformed,
                _ => FailureKind::Other,
            },
            rusqlite::Error::SqlInputError { .. }
            | rusqlite::Error::InvalidParameterCount(..)
            | rusqlite::Error::InvalidParameterName(_)
            | rusqlite::Error::MultipleStatement => FailureKind::Malformed,
            rusqlite::Error::ToSqlConversionFailure(_)
            | rusqlite::Error::InvalidColumnType(..) => FailureKind::TypeMismatch,
            _ => FailureKind::Other,
        }
    }
}

impl SqlTxnError {
    /// Classify the underlying engine error, if there is one.
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            SqlTxnError::SqliteError(source)
            | SqlTxnError::Execution { source, .. }
            | SqlTxnError::RollbackFailed { source, .. } => FailureKind::classify(source),
            _ => FailureKind::Other,
        }
    }

    /// True when the failed statement's transaction was discarded.
    #[must_use]
    pub fn rolled_back(&self) -> bool {
        matches!(self, SqlTxnError::Execution { .. })
    }
}
