use crate::connection::ConnectionProvider;
use crate::error::ExplorerResult;
use crate::introspect::{columns, list_tables, row_count};
use crate::models::{DashboardSummary, TableSummary};
use futures::{StreamExt, TryStreamExt, stream};

/// Upper bound on tables counted at once, each holding its own connection.
pub const SUMMARY_CONCURRENCY: usize = 8;

/// Row and column counts of every table in `database`.
///
/// Up to [`SUMMARY_CONCURRENCY`] tables are counted at once, each on its own
/// connection, and all of them share one request deadline. The result keeps the catalog's name order.
pub async fn summarize(
    provider: &ConnectionProvider,
    database: &str,
) -> ExplorerResult<DashboardSummary> {
    let deadline = provider.deadline();
    let tables = provider.run_until(database, deadline, list_tables).await?;

    let summaries: Vec<TableSummary> = stream::iter(tables)
        .map(|table| {
            provider.run_until(database, deadline, move |conn| {
                Ok(TableSummary {
                    rows: row_count(conn, &table)?,
                    columns: columns(conn, &table)?.len(),
                    name: table,
                })
            })
        })
        .buffered(SUMMARY_CONCURRENCY)
        .try_collect()
        .await?;

    tracing::debug!(database, tables = summaries.len(), "summarized database");
    Ok(DashboardSummary {
        database: database.to_string(),
        table_count: summaries.len(),
        tables: summaries,
    })
}
