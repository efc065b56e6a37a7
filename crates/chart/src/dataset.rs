use plotters::style::RGBColor;
use schema::{AreaChart, TrendSeries};
use tracing::debug;

use crate::align::{align_rates, year_axis};

/// Indigo, red, emerald, amber, blue. Comparison series cycle through these.
pub const SERIES_COLORS: [RGBColor; 5] = [
    RGBColor(79, 70, 229),
    RGBColor(239, 68, 68),
    RGBColor(16, 185, 129),
    RGBColor(245, 158, 11),
    RGBColor(59, 130, 246),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    /// Left axis, average rate in INR
    Rate,
    /// Right axis, units sold
    Demand,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub color: RGBColor,
    pub axis: YAxis,
}

impl Dataset {
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
    }

    /// Runs of consecutive present values; a `None` breaks the line.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (i, value) in self.values.iter().enumerate() {
            match value {
                Some(v) => current.push((i as f64, *v)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Area name usable as part of a file name: path separators become `_`.
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect()
}

/// Everything needed to draw one line chart: an x axis of year labels and
/// datasets aligned with it.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub heading: String,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub file_stem: String,
}

impl ChartData {
    /// Single-area rate and demand chart, `None` when there are no years.
    pub fn trend(area: &str, series: &TrendSeries) -> Option<Self> {
        if series.is_empty() {
            return None;
        }

        if !series.is_consistent() {
            debug!(
                area,
                years = series.len(),
                rates = series.rates.overall.len(),
                demand = series.demand.len(),
                "trend series lengths differ"
            );
        }

        let n = series.len();
        let rates = (0..n).map(|i| series.rate_at(i)).collect();
        let demand = (0..n).map(|i| series.demand_at(i)).collect();

        Some(Self {
            heading: "Price & Demand Trends".to_string(),
            title: format!("Price & Demand Trends for {}", area),
            labels: series.years.clone(),
            datasets: vec![
                Dataset {
                    label: "Weighted Avg Rate (INR)".to_string(),
                    values: rates,
                    color: SERIES_COLORS[0],
                    axis: YAxis::Rate,
                },
                Dataset {
                    label: "Total Demand (Units Sold)".to_string(),
                    values: demand,
                    color: SERIES_COLORS[1],
                    axis: YAxis::Demand,
                },
            ],
            file_stem: format!("{}_trend_chart", file_safe(area)),
        })
    }

    /// Multi-area rate chart on the union of all years, `None` with fewer
    /// than two areas.
    pub fn comparison(areas: &[AreaChart]) -> Option<Self> {
        if areas.len() < 2 {
            return None;
        }

        for area in areas.iter().filter(|a| !a.chart.is_consistent()) {
            debug!(area = %area.area, "comparison series lengths differ");
        }

        let labels = year_axis(areas.iter().map(|a| &a.chart));
        let datasets = areas
            .iter()
            .enumerate()
            .map(|(i, area)| Dataset {
                label: format!("{} - Avg Rate", area.area),
                values: align_rates(&labels, &area.chart),
                color: SERIES_COLORS[i % SERIES_COLORS.len()],
                axis: YAxis::Rate,
            })
            .collect();
        let names: Vec<&str> = areas.iter().map(|a| a.area.as_str()).collect();

        Some(Self {
            heading: format!("Price Comparison: {}", names.join(" vs ")),
            title: "Price Trends Comparison".to_string(),
            labels,
            datasets,
            file_stem: "multi_area_comparison".to_string(),
        })
    }

    pub fn has_axis(&self, axis: YAxis) -> bool {
        self.datasets.iter().any(|d| d.axis == axis)
    }

    pub fn values_on(&self, axis: YAxis) -> impl Iterator<Item = f64> + '_ {
        self.datasets
            .iter()
            .filter(move |d| d.axis == axis)
            .flat_map(|d| d.values.iter().flatten().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn area(name: &str, chart: serde_json::Value) -> AreaChart {
        AreaChart {
            area: name.to_string(),
            chart: serde_json::from_value(chart).unwrap(),
        }
    }

    #[test]
    fn test_trend_chart_pairs_rate_and_demand() {
        let series: TrendSeries = serde_json::from_value(json!({
            "years": ["2020", "2021"],
            "rates": {"overall": [5000.0, 5100.0]},
            "demand": [10, 14]
        }))
        .unwrap();

        let chart = ChartData::trend("Wakad", &series).unwrap();
        assert_eq!(chart.labels, vec!["2020", "2021"]);
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.datasets[0].axis, YAxis::Rate);
        assert_eq!(chart.datasets[1].values, vec![Some(10.0), Some(14.0)]);
        assert_eq!(chart.file_stem, "Wakad_trend_chart");
        assert!(chart.has_axis(YAxis::Demand));
    }

    #[test]
    fn test_trend_file_stem_has_no_separators() {
        let series: TrendSeries =
            serde_json::from_value(json!({"years": ["2020"], "rates": {"overall": [1.0]}})).unwrap();

        let chart = ChartData::trend("Pimple/Saudagar\\East", &series).unwrap();
        assert_eq!(chart.file_stem, "Pimple_Saudagar_East_trend_chart");
        assert!(chart.title.ends_with("Pimple/Saudagar\\East"));
    }

    #[test]
    fn test_trend_chart_needs_years() {
        assert!(ChartData::trend("Wakad", &TrendSeries::default()).is_none());
    }

    #[test]
    fn test_trend_chart_pads_malformed_series() {
        let series: TrendSeries = serde_json::from_value(json!({
            "years": ["2020", "2021", "2022"],
            "rates": {"overall": [1.0, 2.0]},
            "demand": [5]
        }))
        .unwrap();

        let chart = ChartData::trend("Baner", &series).unwrap();
        assert_eq!(chart.datasets[0].values, vec![Some(1.0), Some(2.0), None]);
        assert_eq!(chart.datasets[1].values, vec![Some(5.0), None, None]);
    }

    #[test]
    fn test_comparison_aligns_each_area() {
        let areas = vec![
            area("Aundh", json!({"years": ["2019", "2020"], "rates": {"overall": [10.0, 11.0]}})),
            area("Wakad", json!({"years": ["2020", "2021"], "rates": {"overall": [20.0, 21.0]}})),
        ];

        let chart = ChartData::comparison(&areas).unwrap();
        assert_eq!(chart.labels, vec!["2019", "2020", "2021"]);
        assert_eq!(chart.heading, "Price Comparison: Aundh vs Wakad");
        assert_eq!(chart.datasets[0].label, "Aundh - Avg Rate");
        assert_eq!(chart.datasets[0].values, vec![Some(10.0), Some(11.0), None]);
        assert_eq!(chart.datasets[1].values, vec![None, Some(20.0), Some(21.0)]);
        assert!(!chart.has_axis(YAxis::Demand));
    }

    #[test]
    fn test_comparison_colors_cycle() {
        let areas: Vec<AreaChart> = (0..6)
            .map(|i| area(&format!("Area {}", i), json!({"years": ["2020"], "rates": {"overall": [1.0]}})))
            .collect();

        let chart = ChartData::comparison(&areas).unwrap();
        assert_eq!(chart.datasets[5].color, SERIES_COLORS[0]);
        assert_eq!(chart.datasets[4].color, SERIES_COLORS[4]);
    }

    #[test]
    fn test_comparison_needs_two_areas() {
        let areas = vec![area("Aundh", json!({"years": ["2019"]}))];
        assert!(ChartData::comparison(&areas).is_none());
        assert!(ChartData::comparison(&[]).is_none());
    }

    #[test]
    fn test_segments_break_on_gaps() {
        let dataset = Dataset {
            label: "x".to_string(),
            values: vec![Some(1.0), Some(2.0), None, Some(4.0), None],
            color: SERIES_COLORS[0],
            axis: YAxis::Rate,
        };

        assert_eq!(
            dataset.segments(),
            vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 4.0)]]
        );
        assert_eq!(dataset.points().count(), 3);
    }
}
