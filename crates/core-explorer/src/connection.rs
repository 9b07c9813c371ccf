use crate::error::{self as explorer_error, ExplorerResult};
use core_registry::Registry;
use rusqlite::{Connection, OpenFlags};
use snafu::{ResultExt, ensure};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Number of SQLite VM instructions between deadline checks.
const PROGRESS_HANDLER_OPS: i32 = 1000;

/// Hands out one short-lived, read-only connection per operation.
///
/// Connections are never pooled: each one is opened for a single logical
/// operation and closed when it goes out of scope, on success and error alike.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    registry: Arc<Registry>,
    query_timeout: Duration,
}

impl ConnectionProvider {
    #[must_use]
    pub const fn new(registry: Arc<Registry>, query_timeout: Duration) -> Self {
        Self {
            registry,
            query_timeout,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    #[must_use]
    pub fn deadline(&self) -> Instant {
        Instant::now() + self.query_timeout
    }

    pub fn open(&self, name: &str) -> ExplorerResult<Connection> {
        self.open_until(name, self.deadline())
    }

    /// Opens `name` read-only. Statements running on the connection are
    /// interrupted once `deadline` has passed.
    pub fn open_until(&self, name: &str, deadline: Instant) -> ExplorerResult<Connection> {
        let path = self.registry.resolve(name)?;
        ensure!(
            path.is_file(),
            explorer_error::DatabaseUnavailableSnafu { db: name, path }
        );
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )
        .context(explorer_error::OpenSnafu { db: name })?;
        conn.progress_handler(
            PROGRESS_HANDLER_OPS,
            Some(move || Instant::now() > deadline),
        );
        tracing::trace!(db = %name, path = %path.display(), "opened connection");
        Ok(conn)
    }

    /// Runs `op` against a fresh connection on the blocking thread pool.
    pub async fn run<T, F>(&self, name: &str, op: F) -> ExplorerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ExplorerResult<T> + Send + 'static,
    {
        self.run_until(name, self.deadline(), op).await
    }

    pub async fn run_until<T, F>(&self, name: &str, deadline: Instant, op: F) -> ExplorerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ExplorerResult<T> + Send + 'static,
    {
        let provider = self.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = provider.open_until(&name, deadline)?;
            op(&conn)
        })
        .await
        .context(explorer_error::TaskJoinSnafu)?
    }
}
