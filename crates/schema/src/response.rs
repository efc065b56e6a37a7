use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::series::TrendSeries;

/// Field whose presence marks a multi-area payload.
pub const COMPARISON_MARKER: &str = "multi_chart_data";

/// One detail-table record. Column order is kept as received.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub use_llm: bool,
}

impl QueryRequest {
    /// LLM-backed analysis is always disabled from this client.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            use_llm: false,
        }
    }
}

/// Single-area analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub area: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub chart: TrendSeries,
    #[serde(default)]
    pub table: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaChart {
    pub area: String,
    #[serde(default)]
    pub chart: TrendSeries,
}

/// Multi-area comparison. The backend sends an empty table here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(default)]
    pub comparison_areas: Vec<String>,
    #[serde(default)]
    pub summary: String,
    pub multi_chart_data: Vec<AreaChart>,
    #[serde(default)]
    pub table: Vec<Row>,
}

/// The two payload shapes returned by the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Single(QueryResult),
    Comparison(ComparisonResult),
}

impl QueryResponse {
    /// Dispatch on the comparison marker: a non-null `multi_chart_data`
    /// means comparison, anything else is read as a single-area result.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let is_comparison = value
            .get(COMPARISON_MARKER)
            .is_some_and(|marker| !marker.is_null());

        if is_comparison {
            serde_json::from_value(value).map(QueryResponse::Comparison)
        } else {
            serde_json::from_value(value).map(QueryResponse::Single)
        }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, QueryResponse::Comparison(_))
    }

    pub fn summary(&self) -> &str {
        match self {
            QueryResponse::Single(r) => &r.summary,
            QueryResponse::Comparison(r) => &r.summary,
        }
    }

    pub fn table(&self) -> &[Row] {
        match self {
            QueryResponse::Single(r) => &r.table,
            QueryResponse::Comparison(r) => &r.table,
        }
    }

    /// Heading shown above the summary.
    pub fn area_label(&self) -> String {
        match self {
            QueryResponse::Single(r) => r.area.clone(),
            QueryResponse::Comparison(r) => {
                format!("Comparison: {}", r.comparison_areas.join(", "))
            }
        }
    }
}

impl<'de> Deserialize<'de> for QueryResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        QueryResponse::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreasResponse {
    #[serde(default)]
    pub areas: Vec<String>,
}

/// Error body sent with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}
