use crate::error::{self as explorer_error, ExplorerResult};
use crate::introspect::{ensure_table, quote_identifier, row_count};
use crate::models::{CellValue, Page, Row, TablePage};
use rusqlite::{Connection, params};
use snafu::{OptionExt, ensure};

/// Validated page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
    offset: i64,
}

impl PageRequest {
    /// `page` defaults to 1 and `per_page` to `default_per_page`.
    /// Zero or negative values are rejected rather than clamped.
    pub fn new(
        page: Option<i64>,
        per_page: Option<i64>,
        default_per_page: i64,
    ) -> ExplorerResult<Self> {
        let page = page.unwrap_or(1);
        let per_page = per_page.unwrap_or(default_per_page);
        ensure!(
            page >= 1,
            explorer_error::InvalidPaginationSnafu {
                reason: format!("page must be at least 1, got {page}"),
            }
        );
        ensure!(
            per_page >= 1,
            explorer_error::InvalidPaginationSnafu {
                reason: format!("per_page must be at least 1, got {per_page}"),
            }
        );
        let offset = (page - 1)
            .checked_mul(per_page)
            .context(explorer_error::InvalidPaginationSnafu {
                reason: format!("page {page} with per_page {per_page} is out of range"),
            })?;
        Ok(Self {
            page,
            per_page,
            offset,
        })
    }

    #[must_use]
    pub const fn page(&self) -> i64 {
        self.page
    }

    #[must_use]
    pub const fn per_page(&self) -> i64 {
        self.per_page
    }

    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }
}

/// Reads one page of `table`.
///
/// Pages past the end are not an error, they simply hold no rows.
pub fn query_page(
    conn: &Connection,
    table: &str,
    request: PageRequest,
) -> ExplorerResult<TablePage> {
    let table = ensure_table(conn, table)?;
    let total = row_count(conn, &table)?;

    let sql = format!(
        "SELECT * FROM {} LIMIT ?1 OFFSET ?2",
        quote_identifier(&table)
    );
    let mut stmt = conn.prepare(&sql)?;
    // result column order, generated columns included
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut rows = stmt.query(params![request.per_page, request.offset])?;
    let mut data = Vec::new();
    while let Some(row) = rows.next()? {
        let mut record = Row::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            record.insert(name.clone(), CellValue::from(row.get_ref(idx)?));
        }
        data.push(record);
    }
    tracing::debug!(
        table = %table,
        page = request.page,
        per_page = request.per_page,
        total,
        returned = data.len(),
        "read table page"
    );

    Ok(TablePage {
        columns,
        data,
        pagination: Page::new(request.page, request.per_page, total),
    })
}
