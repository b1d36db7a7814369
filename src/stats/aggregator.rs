//! Summary Aggregator Module
//! Computes the dashboard metrics and chart series for a filtered view.

use crate::data::FilteredView;
use chrono::NaiveDateTime;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// One point of the vehicles-over-time series.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: String,
    pub occurred_at: Option<NaiveDateTime>,
    pub vehicles: u64,
}

/// Everything the presenter draws for one filter selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    pub total: usize,
    /// Undefined for an empty view.
    pub mean_vehicles: Option<f64>,
    /// Over records with a known severity only.
    pub mean_severity: Option<f64>,
    pub city_counts: BTreeMap<String, usize>,
    pub road_type_counts: BTreeMap<String, usize>,
    pub weather_share: BTreeMap<String, f64>,
    /// Source order.
    pub vehicle_trend: Vec<TrendPoint>,
}

/// Handles summary calculations.
pub struct SummaryCalculator;

impl SummaryCalculator {
    pub fn summarize(view: &FilteredView<'_>) -> DashboardSummary {
        let vehicles: Vec<f64> = view
            .iter()
            .map(|r| r.vehicles_involved_count as f64)
            .collect();
        let severities: Vec<f64> = view
            .iter()
            .filter_map(|r| r.severity_level.map(f64::from))
            .collect();

        let weather_counts = Self::count_by(view, |r| r.record.weather.as_str());
        let total = view.len();
        let weather_share = weather_counts
            .into_iter()
            .map(|(weather, n)| (weather, n as f64 / total as f64))
            .collect();

        DashboardSummary {
            total,
            mean_vehicles: Self::mean(&vehicles),
            mean_severity: Self::mean(&severities),
            city_counts: Self::count_by(view, |r| r.record.city.as_str()),
            road_type_counts: Self::count_by(view, |r| r.record.road_type.as_str()),
            weather_share,
            vehicle_trend: view
                .iter()
                .map(|r| TrendPoint {
                    date: r.record.date.clone(),
                    occurred_at: r.occurred_at,
                    vehicles: r.vehicles_involved_count,
                })
                .collect(),
        }
    }

    /// Arithmetic mean, `None` when there are no values.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().mean())
    }

    fn count_by<F>(view: &FilteredView<'_>, key: F) -> BTreeMap<String, usize>
    where
        F: Fn(&crate::data::NormalizedRecord) -> &str,
    {
        let mut counts = BTreeMap::new();
        for r in view {
            *counts.entry(key(r).to_string()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{filter_records, AccidentRecord, DataProcessor, FilterOptions, FilterSelection, NormalizedRecord};
    use std::collections::HashSet;

    fn rec(city: &str, weather: &str, road: &str, severity: &str, vehicles: &str) -> NormalizedRecord {
        DataProcessor::normalize_record(AccidentRecord {
            accident_id: format!("{city}-{vehicles}"),
            city: city.to_string(),
            weather: weather.to_string(),
            road_type: road.to_string(),
            severity: severity.to_string(),
            vehicles_involved: vehicles.to_string(),
            date: "2023-03-01".to_string(),
            ..Default::default()
        })
    }

    fn select_all(records: &[NormalizedRecord]) -> FilterSelection {
        FilterSelection::all(&FilterOptions::observe(records))
    }

    #[test]
    fn test_empty_view_has_undefined_means() {
        let records: Vec<NormalizedRecord> = Vec::new();
        let view = filter_records(&records, &FilterSelection::default());
        let summary = SummaryCalculator::summarize(&view);

        assert_eq!(summary.total, 0);
        assert_eq!(summary.mean_vehicles, None);
        assert_eq!(summary.mean_severity, None);
        assert!(summary.city_counts.is_empty());
        assert!(summary.weather_share.is_empty());
        assert!(summary.vehicle_trend.is_empty());
    }

    #[test]
    fn test_means_skip_unknown_severity() {
        let records = vec![
            rec("A", "Rain", "Highway", "High", "3 cars"),
            rec("A", "Rain", "Urban", "Unknown", "none"),
            rec("B", "Clear", "Urban", "Low", "2"),
        ];
        let view = filter_records(&records, &select_all(&records));
        let summary = SummaryCalculator::summarize(&view);

        assert_eq!(summary.total, 3);
        // (3 + 0 + 2) / 3
        assert!((summary.mean_vehicles.unwrap() - 5.0 / 3.0).abs() < 1e-9);
        // (3 + 1) / 2, the unknown label is ignored
        assert!((summary.mean_severity.unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_known_severity_is_undefined() {
        let records = vec![rec("A", "Rain", "Urban", "Severe", "1")];
        let view = filter_records(&records, &select_all(&records));
        let summary = SummaryCalculator::summarize(&view);

        assert_eq!(summary.mean_vehicles, Some(1.0));
        assert_eq!(summary.mean_severity, None);
    }

    #[test]
    fn test_city_counts_after_filter() {
        let records = vec![
            rec("A", "Rain", "Highway", "High", "1"),
            rec("A", "Clear", "Urban", "Low", "2"),
            rec("B", "Rain", "Urban", "Medium", "3"),
        ];
        let mut selection = select_all(&records);
        selection.cities = HashSet::from(["A".to_string()]);

        let summary = SummaryCalculator::summarize(&filter_records(&records, &selection));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.city_counts, BTreeMap::from([("A".to_string(), 2)]));
        assert_eq!(
            summary.road_type_counts,
            BTreeMap::from([("Highway".to_string(), 1), ("Urban".to_string(), 1)])
        );
    }

    #[test]
    fn test_weather_share_sums_to_one() {
        let records = vec![
            rec("A", "Rain", "Urban", "Low", "1"),
            rec("A", "Rain", "Urban", "Low", "1"),
            rec("A", "Rain", "Urban", "Low", "1"),
            rec("B", "Fog", "Urban", "Low", "1"),
        ];
        let summary = SummaryCalculator::summarize(&filter_records(&records, &select_all(&records)));

        assert_eq!(summary.weather_share.get("Rain"), Some(&0.75));
        assert_eq!(summary.weather_share.get("Fog"), Some(&0.25));
        let total: f64 = summary.weather_share.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_keeps_source_order() {
        let records = vec![
            rec("B", "Rain", "Urban", "Low", "5"),
            rec("A", "Rain", "Urban", "Low", "1 van"),
        ];
        let summary = SummaryCalculator::summarize(&filter_records(&records, &select_all(&records)));

        let vehicles: Vec<u64> = summary.vehicle_trend.iter().map(|p| p.vehicles).collect();
        assert_eq!(vehicles, vec![5, 1]);
        assert!(summary.vehicle_trend.iter().all(|p| p.occurred_at.is_some()));
    }
}
