use crate::error::{self as explorer_error, ExplorerResult};
use crate::introspect::table_exists;
use crate::models::{CurrentMetrics, MetricsSample, MetricsSeries};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension, Row};
use snafu::{OptionExt, ensure};

/// Table of averaged system samples written by the monitoring agent.
pub const METRICS_TABLE: &str = "sistema_info_media";

/// Number of samples in the comparison chart (one day at 10 minute averages).
pub const RECENT_SAMPLES: i64 = 144;

const SAMPLE_COLUMNS: &str =
    "id, timestamp, cpu_media, ram_media, temperatura_media, potencia_media";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn ensure_metrics_table(conn: &Connection) -> ExplorerResult<()> {
    ensure!(
        table_exists(conn, METRICS_TABLE)?,
        explorer_error::MetricsTableNotFoundSnafu {
            table: METRICS_TABLE
        }
    );
    Ok(())
}

fn metric_value(value: ValueRef<'_>) -> Option<f64> {
    match value {
        #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
        ValueRef::Integer(i) => Some(i as f64),
        ValueRef::Real(f) => Some(f),
        ValueRef::Text(text) => std::str::from_utf8(text).ok()?.trim().parse().ok(),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

fn text_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(text) => Some(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

fn sample_from_row(row: &Row<'_>) -> rusqlite::Result<MetricsSample> {
    Ok(MetricsSample {
        id: match row.get_ref(0)? {
            ValueRef::Integer(id) => Some(id),
            _ => None,
        },
        timestamp: text_value(row.get_ref(1)?),
        cpu: metric_value(row.get_ref(2)?),
        ram: metric_value(row.get_ref(3)?),
        temperature: metric_value(row.get_ref(4)?),
        power: metric_value(row.get_ref(5)?),
    })
}

/// Formats a sample timestamp as `HH:MM`.
///
/// Timestamps that do not parse keep working: the label becomes the
/// characters at `[len - 8, len - 3)` of the raw text, which is the
/// `HH:MM` part of a `...HH:MM:SS` suffix, or the whole text when it is
/// 8 characters or shorter.
#[must_use]
pub fn time_label(timestamp: &str) -> String {
    let trimmed = timestamp.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return format_hour_minute(parsed.hour(), parsed.minute());
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return format_hour_minute(parsed.hour(), parsed.minute());
        }
    }
    if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
        return "00:00".to_string();
    }
    fallback_label(timestamp)
}

fn format_hour_minute(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

fn fallback_label(timestamp: &str) -> String {
    let chars: Vec<char> = timestamp.chars().collect();
    if chars.len() > 8 {
        chars[chars.len() - 8..chars.len() - 3].iter().collect()
    } else {
        timestamp.to_string()
    }
}

/// The most recent samples in chronological order, shaped for charting.
pub fn recent_series(conn: &Connection) -> ExplorerResult<MetricsSeries> {
    ensure_metrics_table(conn)?;
    let sql = format!(
        "SELECT {SAMPLE_COLUMNS} FROM {METRICS_TABLE} ORDER BY timestamp DESC LIMIT ?1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let samples = stmt
        .query_map([RECENT_SAMPLES], sample_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut series = MetricsSeries::default();
    for sample in samples.iter().rev() {
        let label = sample.timestamp.as_deref().map(time_label).unwrap_or_default();
        series.push(label, sample);
    }
    tracing::debug!(samples = series.len(), "built metrics series");
    Ok(series)
}

/// The sample with the greatest timestamp.
pub fn latest_sample(conn: &Connection) -> ExplorerResult<CurrentMetrics> {
    ensure_metrics_table(conn)?;
    let sql = format!(
        "SELECT {SAMPLE_COLUMNS} FROM {METRICS_TABLE} ORDER BY timestamp DESC LIMIT 1"
    );
    let sample = conn
        .query_row(&sql, [], sample_from_row)
        .optional()?
        .context(explorer_error::NoMetricsDataSnafu {
            table: METRICS_TABLE,
        })?;
    Ok(CurrentMetrics::from(&sample))
}
