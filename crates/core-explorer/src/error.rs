use core_registry::RegistryError;
use rusqlite::ErrorCode;
use snafu::prelude::*;
use std::path::PathBuf;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum ExplorerError {
    #[snafu(transparent)]
    Registry { source: RegistryError },

    #[snafu(display("Database {db} is unavailable: {} does not exist", path.display()))]
    DatabaseUnavailable { db: String, path: PathBuf },

    #[snafu(display("Unable to open database {db}: {source}"))]
    Open { db: String, source: rusqlite::Error },

    #[snafu(display("Table {table} not found"))]
    TableNotFound { table: String },

    #[snafu(display("Invalid table identifier: {ident:?}"))]
    InvalidIdentifier { ident: String },

    #[snafu(display("Invalid pagination: {reason}"))]
    InvalidPagination { reason: String },

    #[snafu(display("Table {table} not found"))]
    MetricsTableNotFound { table: String },

    #[snafu(display("No data available in {table}"))]
    NoMetricsData { table: String },

    #[snafu(display("Query failed: {source}"))]
    Sqlite { source: rusqlite::Error },

    #[snafu(display("Query deadline exceeded"))]
    Timeout,

    #[snafu(display("Blocking task failed: {source}"))]
    TaskJoin { source: tokio::task::JoinError },
}

pub type ExplorerResult<T> = std::result::Result<T, ExplorerError>;

// Statements interrupted by the connection's progress handler surface as
// `SQLITE_INTERRUPT`; that only happens once the request deadline has passed.
impl From<rusqlite::Error> for ExplorerError {
    fn from(source: rusqlite::Error) -> Self {
        match &source {
            rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::OperationInterrupted => {
                Self::Timeout
            }
            _ => Self::Sqlite { source },
        }
    }
}
