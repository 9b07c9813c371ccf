#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::fixtures::{MISSING_DB, MONITOR_DB, SHOP_DB, TestDatabases};
use crate::error::ExplorerError;
use crate::introspect::{describe_table, ensure_table, list_tables};

#[test]
fn test_list_tables_sorted() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    assert_eq!(
        list_tables(&conn).unwrap(),
        vec!["order items", "products", "users"]
    );

    let conn = dbs.reader(MONITOR_DB);
    assert_eq!(
        list_tables(&conn).unwrap(),
        vec!["sistema_info_media", "sqlite_sequence"]
    );
}

#[test]
fn test_describe_table() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    let description = describe_table(&conn, "users").unwrap();
    assert_eq!(description.row_count, 23);

    insta::assert_json_snapshot!(description.columns, @r#"
    [
      {
        "cid": 0,
        "name": "id",
        "type": "INTEGER",
        "notnull": 0,
        "default": null,
        "pk": 1
      },
      {
        "cid": 1,
        "name": "name",
        "type": "TEXT",
        "notnull": 1,
        "default": null,
        "pk": 0
      },
      {
        "cid": 2,
        "name": "email",
        "type": "TEXT",
        "notnull": 0,
        "default": "'unknown'",
        "pk": 0
      },
      {
        "cid": 3,
        "name": "created_at",
        "type": "TEXT",
        "notnull": 0,
        "default": null,
        "pk": 0
      }
    ]
    "#);
}

#[test]
fn test_describe_composite_key_and_quoted_name() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    let description = describe_table(&conn, "order items").unwrap();
    assert_eq!(description.row_count, 1);
    let keys: Vec<_> = description
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.primary_key, c.not_null))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("order_id", 1, true),
            ("product_id", 2, true),
            ("qty", 0, false)
        ]
    );
    assert!(description.columns[0].is_primary_key());
    assert!(!description.columns[2].is_primary_key());
}

#[test]
fn test_describe_unknown_table() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    let err = describe_table(&conn, "customers").unwrap_err();
    assert!(matches!(err, ExplorerError::TableNotFound { table } if table == "customers"));
}

#[test]
fn test_injection_attempts_never_execute() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    for attempt in [
        "users; DROP TABLE products",
        "users WHERE 1=1",
        "users --",
        "\"users\"",
        "users)",
        "sqlite_master",
    ] {
        let err = describe_table(&conn, attempt).unwrap_err();
        assert!(
            matches!(err, ExplorerError::TableNotFound { .. }),
            "{attempt}: {err}"
        );
    }
    drop(conn);

    let conn = dbs.writer(SHOP_DB);
    assert_eq!(
        list_tables(&conn).unwrap(),
        vec!["order items", "products", "users"]
    );
}

#[test]
fn test_malformed_identifiers() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    for ident in ["", "users\0"] {
        let err = ensure_table(&conn, ident).unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidIdentifier { .. }));
    }
}

#[test]
fn test_ensure_table_returns_catalog_spelling() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    assert_eq!(ensure_table(&conn, "USERS").unwrap(), "users");
    assert_eq!(ensure_table(&conn, "Order Items").unwrap(), "order items");

    let upper = describe_table(&conn, "USERS").unwrap();
    assert_eq!(upper, describe_table(&conn, "users").unwrap());
    assert_eq!(upper.row_count, 23);
}

#[test]
fn test_describe_generated_columns() {
    let dbs = TestDatabases::new();
    let conn = dbs.writer(MISSING_DB);
    conn.execute_batch(
        "CREATE TABLE gen (a INTEGER, b INTEGER AS (a * 100) STORED, c TEXT);
         INSERT INTO gen (a, c) VALUES (1, 'x');",
    )
    .unwrap();
    drop(conn);

    let conn = dbs.reader(MISSING_DB);
    let description = describe_table(&conn, "gen").unwrap();
    let names: Vec<_> = description.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(description.row_count, 1);
}
