// SQLite backend, split into:
// - config: where the database lives and how to open it
// - connection: the connection wrapper and its transaction state transitions
// - params / query: value conversion and result extraction
// - transaction: the execute-inside-a-transaction wrapper

pub mod config;
pub mod connection;
pub mod params;
pub mod query;
pub mod transaction;

pub use config::{DbTarget, MEMORY_MARKER, SqliteOptions, SqliteOptionsBuilder};
pub use connection::SqliteConnection;
pub use params::Params;
pub use query::build_result_set;
pub use transaction::execute_transaction;
