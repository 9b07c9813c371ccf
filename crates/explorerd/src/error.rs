use api_ui::error::ApiError;
use core_registry::RegistryError;
use snafu::prelude::*;
use std::path::PathBuf;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum DaemonError {
    #[snafu(display("Failed to load config {}: {source}", path.display()))]
    LoadConfig {
        path: PathBuf,
        source: RegistryError,
    },

    #[snafu(display("Failed to build router: {source}"))]
    Router { source: ApiError },

    #[snafu(display("Failed to bind to {host}:{port}: {source}"))]
    Bind {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    #[snafu(display("Server error: {source}"))]
    Serve { source: std::io::Error },
}

pub type DaemonResult<T> = Result<T, DaemonError>;
