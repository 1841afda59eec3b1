use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use sqlite_txn::SqliteOptions;
use sqlite_txn::sqlite::SqliteOptionsBuilder;

pub(crate) const DEFAULT_DB_PATH: &str = "test.db";

#[derive(Parser, Debug)]
#[command(author, version, about = "Create the users table and insert sample rows in one transaction")]
pub(crate) struct Args {
    /// Database file; `:memory:` selects a transient database.
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub(crate) db: String,
    /// Ignore `--db` and use a transient in-memory database.
    #[arg(long)]
    pub(crate) memory: bool,
    /// Also append log output to this file.
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DemoConfig {
    pub(crate) sqlite: SqliteOptions,
    pub(crate) users: Vec<(String, i64)>,
    pub(crate) log: Option<PathBuf>,
    pub(crate) verbose: bool,
}

impl DemoConfig {
    pub(crate) fn from_args(args: Args) -> Self {
        let sqlite = SqliteOptionsBuilder::new(&args.db)
            .in_memory(args.memory)
            .finish();
        DemoConfig {
            sqlite,
            users: default_users(),
            log: args.log,
            verbose: args.verbose,
        }
    }
}

fn default_users() -> Vec<(String, i64)> {
    [("John", 30), ("Alice", 25), ("Bob", 35)]
        .into_iter()
        .map(|(name, age)| (name.to_string(), age))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlite_txn::sqlite::DbTarget;

    #[test]
    fn defaults_to_file_backed_test_db() {
        let config = DemoConfig::from_args(Args::parse_from(["demo"]));
        assert_eq!(
            config.sqlite.target,
            DbTarget::File(PathBuf::from(DEFAULT_DB_PATH))
        );
        assert_eq!(config.users.len(), 3);
        assert!(!config.verbose);
    }

    #[test]
    fn memory_flag_wins_over_path() {
        let config = DemoConfig::from_args(Args::parse_from(["demo", "--db", "x.db", "--memory"]));
        assert_eq!(config.sqlite.target, DbTarget::Memory);
    }

    #[test]
    fn memory_marker_path_is_transient() {
        let config = DemoConfig::from_args(Args::parse_from(["demo", "--db", ":memory:"]));
        assert_eq!(config.sqlite.target, DbTarget::Memory);
    }
}
