//! Convenient imports for common functionality.

pub use crate::error::{FailureKind, SqlTxnError};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::sqlite::{
    DbTarget, SqliteConnection, SqliteOptions, SqliteOptionsBuilder, execute_transaction,
};
pub use crate::status::{report_transaction_status, transaction_status};
pub use crate::types::{RowValues, TxState};
