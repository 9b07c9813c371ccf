#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::fixtures::{SHOP_DB, TestDatabases};
use crate::error::ExplorerError;
use crate::models::ChartSeries;
use crate::temporal::{DAILY_BUCKETS, build_daily_series};
use rusqlite::params;

#[test]
fn test_daily_counts_ascending() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    let series = build_daily_series(&conn, "users").unwrap();
    assert_eq!(
        series,
        ChartSeries::from_points([("2024-03-01", 5), ("2024-03-02", 10), ("2024-03-03", 6)])
    );
}

#[test]
fn test_fallback_to_row_count() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    let series = build_daily_series(&conn, "products").unwrap();
    insta::assert_json_snapshot!(series, @r#"
    {
      "labels": [
        "products"
      ],
      "values": [
        2
      ]
    }
    "#);
}

#[test]
fn test_keeps_most_recent_buckets() {
    let dbs = TestDatabases::new();
    let writer = dbs.writer(SHOP_DB);
    writer
        .execute_batch("CREATE TABLE events (id INTEGER PRIMARY KEY, event_date TEXT, runtime REAL)")
        .unwrap();
    for day in 1..=45 {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(day - 1))
            .unwrap();
        writer
            .execute(
                "INSERT INTO events (event_date, runtime) VALUES (?1, 1.5)",
                params![format!("{date} 12:00:00")],
            )
            .unwrap();
    }
    writer
        .execute("INSERT INTO events (event_date) VALUES ('not a date')", [])
        .unwrap();
    drop(writer);

    let conn = dbs.reader(SHOP_DB);
    let series = build_daily_series(&conn, "events").unwrap();
    assert_eq!(series.len(), usize::try_from(DAILY_BUCKETS).unwrap());
    assert_eq!(series.labels().len(), series.values().len());
    assert_eq!(series.labels().first().unwrap(), "2024-01-16");
    assert_eq!(series.labels().last().unwrap(), "2024-02-14");
    assert!(series.values().iter().all(|v| *v == 1));
}

#[test]
fn test_unparseable_dates_are_labeled_unknown() {
    let dbs = TestDatabases::new();
    let writer = dbs.writer(SHOP_DB);
    writer
        .execute_batch(
            "CREATE TABLE jobs (id INTEGER, runtime TEXT);
             INSERT INTO jobs VALUES (1, 'fast'), (2, 'slow'), (3, '2024-02-01');",
        )
        .unwrap();
    drop(writer);

    let conn = dbs.reader(SHOP_DB);
    let series = build_daily_series(&conn, "jobs").unwrap();
    // NULL sorts lowest, so it ends up as the oldest bucket
    assert_eq!(
        series,
        ChartSeries::from_points([("Unknown", 2), ("2024-02-01", 1)])
    );
}

#[test]
fn test_unknown_table() {
    let dbs = TestDatabases::new();
    let conn = dbs.reader(SHOP_DB);
    let err = build_daily_series(&conn, "users; DROP TABLE users").unwrap_err();
    assert!(matches!(err, ExplorerError::TableNotFound { .. }));
}
