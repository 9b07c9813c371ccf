use crate::error::ExplorerResult;
use crate::introspect::{column_names, ensure_table, quote_identifier, row_count};
use crate::models::ChartSeries;
use rusqlite::Connection;

/// Number of most recent day buckets in a daily series.
pub const DAILY_BUCKETS: i64 = 30;

const TEMPORAL_HINTS: [&str; 3] = ["date", "time", "created"];

/// Guesses the timestamp column of a table from column names alone.
///
/// Returns the first column, in catalog order, whose lowercase name contains
/// `date`, `time` or `created`. The declared type is ignored, so a column
/// such as `runtime` matches as well.
#[must_use]
pub fn find_temporal_column<S: AsRef<str>>(columns: &[S]) -> Option<&str> {
    columns.iter().map(AsRef::<str>::as_ref).find(|name| {
        let lower = name.to_lowercase();
        TEMPORAL_HINTS.iter().any(|hint| lower.contains(hint))
    })
}

/// Row counts per calendar day of the table's temporal column, oldest first.
///
/// Tables without a temporal column get a single point: the table name and
/// its total row count.
pub fn build_daily_series(conn: &Connection, table: &str) -> ExplorerResult<ChartSeries> {
    let table = ensure_table(conn, table)?;
    let columns = column_names(conn, &table)?;

    let Some(column) = find_temporal_column(columns.as_slice()) else {
        tracing::debug!(table = %table, "no temporal column, using row count");
        let total = row_count(conn, &table)?;
        return Ok(ChartSeries::from_points([(table, total)]));
    };
    tracing::debug!(table = %table, column, "bucketing rows by day");

    let column = quote_identifier(column);
    let sql = format!(
        "SELECT DATE({column}) AS day, COUNT(*) AS count \
         FROM {table} \
         WHERE {column} IS NOT NULL \
         GROUP BY DATE({column}) \
         ORDER BY day DESC \
         LIMIT ?1",
        table = quote_identifier(&table),
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut buckets = stmt
        .query_map([DAILY_BUCKETS], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?
                    .unwrap_or_else(|| "Unknown".to_string()),
                row.get::<_, i64>(1)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    buckets.reverse();

    Ok(ChartSeries::from_points(buckets))
}
