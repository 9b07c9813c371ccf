use indexmap::IndexMap;
use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// One column as reported by `pragma_table_xinfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ColumnDescriptor {
    #[serde(rename = "cid")]
    pub position: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: String,
    #[serde(rename = "notnull", with = "bool_as_int")]
    #[schema(value_type = u8)]
    pub not_null: bool,
    #[serde(rename = "default")]
    pub default_value: Option<String>,
    /// 1-based position inside the primary key, 0 when the column is not part of it.
    #[serde(rename = "pk")]
    pub primary_key: i64,
}

impl ColumnDescriptor {
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key > 0
    }
}

mod bool_as_int {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(deserializer)? != 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TableDescription {
    pub columns: Vec<ColumnDescriptor>,
    pub row_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TableSummary {
    pub name: String,
    pub rows: i64,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummary {
    pub database: String,
    pub table_count: usize,
    pub tables: Vec<TableSummary>,
}

/// A single SQLite value as returned to clients.
///
/// Blobs are not forwarded, only their size.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(usize),
}

impl From<ValueRef<'_>> for CellValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(i) => Self::Integer(i),
            ValueRef::Real(f) => Self::Real(f),
            ValueRef::Text(bytes) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Self::Blob(bytes.len()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Real(f) => serializer.serialize_f64(*f),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Blob(len) => serializer.collect_str(&format_args!("<blob {len} bytes>")),
        }
    }
}

/// Column name to value, in catalog column order.
pub type Row = IndexMap<String, CellValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub pages: i64,
}

impl Page {
    /// `per_page` is validated positive by [`crate::pagination::PageRequest`].
    #[must_use]
    pub const fn new(page: i64, per_page: i64, total: i64) -> Self {
        let pages = if total <= 0 {
            0
        } else {
            (total - 1) / per_page + 1
        };
        Self {
            page,
            per_page,
            total,
            pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TablePage {
    pub columns: Vec<String>,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Row>,
    pub pagination: Page,
}

/// Index-aligned chart labels and values.
///
/// Built from `(label, value)` points so both sides always have the same
/// length; deserialization rejects input where they differ.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UncheckedChartSeries")]
pub struct ChartSeries {
    labels: Vec<String>,
    values: Vec<i64>,
}

#[derive(Deserialize)]
struct UncheckedChartSeries {
    labels: Vec<String>,
    values: Vec<i64>,
}

impl TryFrom<UncheckedChartSeries> for ChartSeries {
    type Error = String;

    fn try_from(value: UncheckedChartSeries) -> Result<Self, Self::Error> {
        if value.labels.len() == value.values.len() {
            Ok(Self {
                labels: value.labels,
                values: value.values,
            })
        } else {
            Err(format!(
                "chart series has {} labels but {} values",
                value.labels.len(),
                value.values.len()
            ))
        }
    }
}

impl ChartSeries {
    pub fn from_points<I, L>(points: I) -> Self
    where
        I: IntoIterator<Item = (L, i64)>,
        L: Into<String>,
    {
        let (labels, values) = points
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        Self { labels, values }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricsDatasets {
    pub cpu: Vec<f64>,
    pub ram: Vec<f64>,
    #[serde(rename = "temperatura")]
    pub temperature: Vec<f64>,
    #[serde(rename = "potencia")]
    pub power: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricsSeries {
    pub labels: Vec<String>,
    pub datasets: MetricsDatasets,
}

impl MetricsSeries {
    pub fn push(&mut self, label: String, sample: &MetricsSample) {
        self.labels.push(label);
        self.datasets.cpu.push(round_metric(sample.cpu));
        self.datasets.ram.push(round_metric(sample.ram));
        self.datasets.temperature.push(round_metric(sample.temperature));
        self.datasets.power.push(round_metric(sample.power));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One row of the fixed-schema metrics table.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSample {
    pub id: Option<i64>,
    pub timestamp: Option<String>,
    pub cpu: Option<f64>,
    pub ram: Option<f64>,
    pub temperature: Option<f64>,
    pub power: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrentMetrics {
    pub cpu: f64,
    pub ram: f64,
    #[serde(rename = "temperatura")]
    pub temperature: f64,
    #[serde(rename = "potencia")]
    pub power: f64,
    pub timestamp: Option<String>,
}

impl From<&MetricsSample> for CurrentMetrics {
    fn from(sample: &MetricsSample) -> Self {
        Self {
            cpu: round_metric(sample.cpu),
            ram: round_metric(sample.ram),
            temperature: round_metric(sample.temperature),
            power: round_metric(sample.power),
            timestamp: sample.timestamp.clone(),
        }
    }
}

/// Rounds to two decimals; missing values count as zero.
#[must_use]
pub fn round_metric(value: Option<f64>) -> f64 {
    value.map_or(0.0, |v| (v * 100.0).round() / 100.0)
}
