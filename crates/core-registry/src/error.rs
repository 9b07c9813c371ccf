use snafu::prelude::*;
use std::path::PathBuf;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum RegistryError {
    #[snafu(display("Database {db} not found"))]
    DatabaseNotFound { db: String },

    #[snafu(display("Unable to resolve path for database {db}: {source}"))]
    ResolvePath { db: String, source: std::io::Error },

    #[snafu(display("Unable to read config file {}: {source}", path.display()))]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Unable to parse config file {}: {source}", path.display()))]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display("Invalid config: {reason}"))]
    InvalidConfig { reason: String },
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
