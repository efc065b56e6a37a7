use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Year-indexed price and demand series for one area.
///
/// `rates.overall` and `demand` are positionally aligned with `years`.
/// The backend is trusted but not enforced: short or missing sequences are
/// kept as-is and read back as gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    #[serde(default, deserialize_with = "year_labels")]
    pub years: Vec<String>,
    #[serde(default)]
    pub rates: Rates,
    #[serde(default)]
    pub demand: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    #[serde(default)]
    pub overall: Vec<Option<f64>>,
    /// Per property type series (flat, office, shop, others)
    #[serde(flatten)]
    pub by_type: BTreeMap<String, Vec<Option<f64>>>,
}

impl TrendSeries {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// True when every series has exactly one value per year.
    pub fn is_consistent(&self) -> bool {
        let n = self.years.len();
        self.rates.overall.len() == n
            && self.demand.len() == n
            && self.rates.by_type.values().all(|s| s.len() == n)
    }

    pub fn rate_at(&self, index: usize) -> Option<f64> {
        self.rates.overall.get(index).copied().flatten()
    }

    pub fn demand_at(&self, index: usize) -> Option<f64> {
        self.demand.get(index).copied().flatten()
    }
}

// Years arrive as strings from the backend, but numeric labels
// are accepted too.
fn year_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|v| match v {
            Value::String(s) => s,
            Value::Number(n) => match n.as_i64() {
                Some(i) => i.to_string(),
                None => n.to_string(),
            },
            other => other.to_string(),
        })
        .collect())
}
