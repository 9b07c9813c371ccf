use crate::error::{self as registry_error, RegistryResult};
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, ensure};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_ROWS_PER_PAGE: i64 = 50;

const fn default_rows_per_page() -> i64 {
    DEFAULT_ROWS_PER_PAGE
}

/// Contents of the explorer `config.json`.
///
/// ```json
/// {
///   "databases": { "monitor": "data/monitor.db" },
///   "pagination": { "rows_per_page": 50 },
///   "port": 7050
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub databases: BTreeMap<String, String>,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_rows_per_page")]
    pub rows_per_page: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl ExplorerConfig {
    pub fn from_file(path: &Path) -> RegistryResult<Self> {
        let content =
            std::fs::read_to_string(path).context(registry_error::ReadConfigSnafu { path })?;
        let config: Self =
            serde_json::from_str(&content).context(registry_error::ParseConfigSnafu { path })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RegistryResult<()> {
        ensure!(
            self.pagination.rows_per_page > 0,
            registry_error::InvalidConfigSnafu {
                reason: format!(
                    "pagination.rows_per_page must be positive, got {}",
                    self.pagination.rows_per_page
                ),
            }
        );
        Ok(())
    }

    pub fn registry(&self, base_dir: &Path) -> RegistryResult<Registry> {
        Registry::new(base_dir, &self.databases)
    }
}
