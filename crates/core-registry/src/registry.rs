use crate::error::{self as registry_error, RegistryResult};
use normalize_path::NormalizePath;
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DatabaseEntry {
    pub name: String,
    #[schema(value_type = String)]
    pub path: PathBuf,
    pub exists: bool,
}

/// Read-only directory of the databases the explorer may open.
///
/// Paths are made absolute once, when the registry is built. Whether a file
/// actually exists is checked on every [`Registry::list_all`] call, since
/// database files can be created or removed while the server runs.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    databases: BTreeMap<String, PathBuf>,
}

impl Registry {
    pub fn new<I, N, P>(base_dir: &Path, databases: I) -> RegistryResult<Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<Path>,
    {
        let mut resolved = BTreeMap::new();
        for (name, path) in databases {
            let name = name.into();
            let absolute = std::path::absolute(base_dir.join(path.as_ref()))
                .context(registry_error::ResolvePathSnafu { db: name.clone() })?
                .normalize();
            tracing::debug!(db = %name, path = %absolute.display(), "registered database");
            resolved.insert(name, absolute);
        }
        Ok(Self {
            databases: resolved,
        })
    }

    pub fn resolve(&self, name: &str) -> RegistryResult<&Path> {
        self.databases
            .get(name)
            .map(PathBuf::as_path)
            .context(registry_error::DatabaseNotFoundSnafu { db: name })
    }

    #[must_use]
    pub fn list_all(&self) -> Vec<DatabaseEntry> {
        self.databases
            .iter()
            .map(|(name, path)| DatabaseEntry {
                name: name.clone(),
                path: path.clone(),
                exists: path.is_file(),
            })
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.databases.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.databases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }
}
