mod core;
mod dml;
mod select;
mod tx;

pub use self::core::SqliteConnection;
