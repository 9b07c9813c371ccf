use crate::error::{self as explorer_error, ExplorerResult};
use crate::models::{ColumnDescriptor, TableDescription};
use rusqlite::{Connection, OptionalExtension, params};
use snafu::{OptionExt, ensure};

/// Quotes `name` as an SQLite identifier.
///
/// Table names only reach this after being checked against the catalog,
/// quoting keeps names with spaces, quotes or keywords working.
#[must_use]
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn list_tables(conn: &Connection) -> ExplorerResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tables)
}

/// The catalog's spelling of `table`, matched the way SQLite resolves
/// identifiers (ASCII case-insensitive).
pub fn catalog_name(conn: &Connection, table: &str) -> ExplorerResult<Option<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
    )?;
    Ok(stmt
        .query_row(params![table], |row| row.get::<_, String>(0))
        .optional()?)
}

pub fn table_exists(conn: &Connection, table: &str) -> ExplorerResult<bool> {
    Ok(catalog_name(conn, table)?.is_some())
}

/// Resolves `table` against the catalog and returns the catalog's name for it.
///
/// Anything else, including SQL fragments such as `users; DROP TABLE x`,
/// is reported as an unknown table and never reaches query text.
pub fn ensure_table(conn: &Connection, table: &str) -> ExplorerResult<String> {
    ensure!(
        !table.is_empty() && !table.contains('\0'),
        explorer_error::InvalidIdentifierSnafu { ident: table }
    );
    catalog_name(conn, table)?.context(explorer_error::TableNotFoundSnafu { table })
}

/// Columns of an already validated table, in catalog order.
///
/// Generated columns are listed too (`SELECT *` returns them); hidden
/// virtual-table columns are not.
pub fn columns(conn: &Connection, table: &str) -> ExplorerResult<Vec<ColumnDescriptor>> {
    let mut stmt = conn.prepare(
        "SELECT cid, name, type, \"notnull\", dflt_value, pk FROM pragma_table_xinfo(?1) \
         WHERE hidden IN (0, 2, 3) ORDER BY cid",
    )?;
    let columns = stmt
        .query_map(params![table], |row| {
            Ok(ColumnDescriptor {
                position: row.get(0)?,
                name: row.get(1)?,
                declared_type: row.get(2)?,
                not_null: row.get::<_, i64>(3)? != 0,
                default_value: row.get(4)?,
                primary_key: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

pub fn column_names(conn: &Connection, table: &str) -> ExplorerResult<Vec<String>> {
    Ok(columns(conn, table)?
        .into_iter()
        .map(|column| column.name)
        .collect())
}

pub fn row_count(conn: &Connection, table: &str) -> ExplorerResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}

pub fn describe_table(conn: &Connection, table: &str) -> ExplorerResult<TableDescription> {
    let table = ensure_table(conn, table)?;
    Ok(TableDescription {
        columns: columns(conn, &table)?,
        row_count: row_count(conn, &table)?,
    })
}
