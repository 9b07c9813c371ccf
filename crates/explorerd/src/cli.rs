use clap::{Parser, ValueEnum};
use core_registry::ExplorerConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::filter::LevelFilter;

pub const DEFAULT_PORT: u16 = 7050;

#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
pub struct CliOpts {
    #[arg(
        short,
        long,
        env = "EXPLORER_CONFIG",
        default_value = "config.json",
        help = "Path to the explorer config file"
    )]
    pub config: PathBuf,

    #[arg(
        long,
        env = "EXPLORER_BASE_DIR",
        help = "Directory database paths are relative to (defaults to the config file's directory)"
    )]
    pub base_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "EXPLORER_HOST",
        default_value = "0.0.0.0",
        help = "Host to bind to"
    )]
    pub host: String,

    #[arg(
        long,
        env = "EXPLORER_PORT",
        help = "Port to bind to (defaults to the config file's port, then 7050)"
    )]
    pub port: Option<u16>,

    #[arg(
        long,
        env = "EXPLORER_STATIC_DIR",
        help = "Directory of the web frontend (defaults to <base-dir>/static)"
    )]
    pub static_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "CORS_ALLOW_ORIGIN",
        default_value = "*",
        help = "CORS Allow Origin, `*` allows any origin"
    )]
    pub cors_allow_origin: String,

    #[arg(
        long,
        env = "QUERY_TIMEOUT_SECS",
        default_value = "30",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Deadline for the database work of a single request"
    )]
    pub query_timeout_secs: u64,

    #[arg(
        long,
        value_enum,
        env = "TRACING_LEVEL",
        default_value = "info",
        help = "Tracing level, it can be overrided by *RUST_LOG* env var"
    )]
    pub tracing_level: TracingLevel,
}

impl CliOpts {
    pub fn base_dir(&self) -> PathBuf {
        self.base_dir.clone().unwrap_or_else(|| {
            self.config
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        })
    }

    pub fn static_dir(&self) -> PathBuf {
        self.static_dir
            .clone()
            .unwrap_or_else(|| self.base_dir().join("static"))
    }

    pub fn port(&self, config: &ExplorerConfig) -> u16 {
        self.port.or(config.port).unwrap_or(DEFAULT_PORT)
    }

    pub const fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TracingLevel {
    Off,
    Info,
    Debug,
    Trace,
}

impl From<TracingLevel> for LevelFilter {
    fn from(level: TracingLevel) -> Self {
        match level {
            TracingLevel::Off => Self::OFF,
            TracingLevel::Info => Self::INFO,
            TracingLevel::Debug => Self::DEBUG,
            TracingLevel::Trace => Self::TRACE,
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}
