use core_registry::PaginationConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub allow_origin: Option<String>,
    pub static_dir: Option<PathBuf>,
    #[serde(default)]
    pub pagination: PaginationConfig,
}
