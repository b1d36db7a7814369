//! Data Processor Module
//! Turns loaded rows into typed, normalized accident records.

use crate::data::record::{AccidentRecord, NormalizedRecord, Severity};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Source column names, matched verbatim.
pub mod columns {
    pub const ACCIDENT_ID: &str = "Accident_ID";
    pub const CITY: &str = "City";
    pub const WEATHER: &str = "Weather";
    pub const ROAD_TYPE: &str = "Road_Type";
    pub const SEVERITY: &str = "Severity";
    pub const VEHICLES_INVOLVED: &str = "Vehicles_Involved";
    pub const CASUALTIES: &str = "Casualties";
    pub const DATE: &str = "Date";
}

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Expected column '{0}' is missing from the data source")]
    FieldAbsent(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit run pattern is valid"));

static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("digit pattern is valid"));

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Build typed records from a loaded table, in row order.
    ///
    /// Fails with [`ProcessorError::FieldAbsent`] naming the first required
    /// column that the table does not have.
    pub fn records_from_frame(df: &DataFrame) -> Result<Vec<AccidentRecord>, ProcessorError> {
        let accident_id = Self::text_column(df, columns::ACCIDENT_ID)?;
        let city = Self::text_column(df, columns::CITY)?;
        let weather = Self::text_column(df, columns::WEATHER)?;
        let road_type = Self::text_column(df, columns::ROAD_TYPE)?;
        let severity = Self::text_column(df, columns::SEVERITY)?;
        let vehicles = Self::text_column(df, columns::VEHICLES_INVOLVED)?;
        let casualties = Self::text_column(df, columns::CASUALTIES)?;
        let date = Self::text_column(df, columns::DATE)?;

        let records = (0..df.height())
            .map(|i| AccidentRecord {
                accident_id: accident_id[i].clone(),
                city: city[i].clone(),
                weather: weather[i].clone(),
                road_type: road_type[i].clone(),
                severity: severity[i].clone(),
                vehicles_involved: vehicles[i].clone(),
                casualties: casualties[i].clone(),
                date: date[i].clone(),
            })
            .collect();

        Ok(records)
    }

    /// Read one column as text, nulls as empty strings.
    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, ProcessorError> {
        let column = df
            .column(name)
            .map_err(|_| ProcessorError::FieldAbsent(name.to_string()))?;
        let as_text = column.cast(&DataType::String)?;
        let values = as_text.str()?;

        Ok(values
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect())
    }

    /// Integer value of the first run of decimal digits in `text`, or 0 if it
    /// has none.
    ///
    /// `"3 cars, 2 trucks"` yields 3: later runs are ignored, not summed.
    /// Any Unicode decimal digit counts (`"٣"` and `"３"` are 3). Runs too
    /// large for `u64` saturate.
    pub fn extract_leading_count(text: &str) -> u64 {
        DIGIT_RUN
            .find(text)
            .map(|m| {
                m.as_str().chars().fold(0u64, |acc, c| {
                    acc.saturating_mul(10)
                        .saturating_add(u64::from(Self::digit_value(c)))
                })
            })
            .unwrap_or(0)
    }

    /// Value of a Unicode decimal digit.
    ///
    /// Decimal digits are encoded as contiguous zero-to-nine runs, so the value
    /// is the offset from the start of the enclosing digit block, modulo 10.
    fn digit_value(c: char) -> u32 {
        if let Some(d) = c.to_digit(10) {
            return d;
        }

        let is_digit = |cp: u32| {
            char::from_u32(cp).is_some_and(|ch| DIGIT.is_match(ch.encode_utf8(&mut [0; 4])))
        };
        let cp = c as u32;
        let mut start = cp;
        while start > 0 && is_digit(start - 1) {
            start -= 1;
        }
        (cp - start) % 10
    }

    /// Parse a date or date-time cell. Plain dates land at midnight.
    pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    /// Derive counts, severity level and timestamp for one record.
    pub fn normalize_record(record: AccidentRecord) -> NormalizedRecord {
        NormalizedRecord {
            vehicles_involved_count: Self::extract_leading_count(&record.vehicles_involved),
            casualties_count: Self::extract_leading_count(&record.casualties),
            severity_level: Severity::from_label(&record.severity).map(Severity::level),
            occurred_at: Self::parse_timestamp(&record.date),
            record,
        }
    }

    pub fn normalize(records: Vec<AccidentRecord>) -> Vec<NormalizedRecord> {
        records.into_iter().map(Self::normalize_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(vehicles: &str, severity: &str) -> AccidentRecord {
        AccidentRecord {
            vehicles_involved: vehicles.to_string(),
            severity: severity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_digit_run_wins() {
        assert_eq!(DataProcessor::extract_leading_count("3 cars, 2 trucks"), 3);
        assert_eq!(DataProcessor::extract_leading_count("about 12"), 12);
        assert_eq!(DataProcessor::extract_leading_count("x7y8"), 7);
        assert_eq!(DataProcessor::extract_leading_count("007"), 7);
        assert_eq!(DataProcessor::extract_leading_count("4.5"), 4);
    }

    #[test]
    fn test_no_digits_is_zero() {
        assert_eq!(DataProcessor::extract_leading_count(""), 0);
        assert_eq!(DataProcessor::extract_leading_count("none"), 0);
        assert_eq!(DataProcessor::extract_leading_count("nan"), 0);
    }

    #[test]
    fn test_unicode_decimal_digits() {
        // Arabic-Indic and fullwidth digits
        assert_eq!(DataProcessor::extract_leading_count("٣ cars"), 3);
        assert_eq!(DataProcessor::extract_leading_count("３ cars"), 3);
        assert_eq!(DataProcessor::extract_leading_count("١٢ vehicles"), 12);
        assert_eq!(DataProcessor::extract_leading_count("０９"), 9);
        // Devanagari seven, mathematical bold eight (second digit block in a row)
        assert_eq!(DataProcessor::extract_leading_count("७"), 7);
        assert_eq!(DataProcessor::extract_leading_count("𝟖"), 8);
        // Superscripts are not decimal digits
        assert_eq!(DataProcessor::extract_leading_count("²"), 0);
    }

    #[test]
    fn test_huge_run_saturates() {
        assert_eq!(
            DataProcessor::extract_leading_count("999999999999999999999999 vehicles"),
            u64::MAX
        );
    }

    #[test]
    fn test_normalize_high_three_cars() {
        let n = DataProcessor::normalize_record(record("3 cars", "High"));
        assert_eq!(n.vehicles_involved_count, 3);
        assert_eq!(n.severity_level, Some(3));
        assert_eq!(n.record.vehicles_involved, "3 cars");
    }

    #[test]
    fn test_normalize_unknown_is_silent_null() {
        let n = DataProcessor::normalize_record(record("none", "Unknown"));
        assert_eq!(n.vehicles_involved_count, 0);
        assert_eq!(n.severity_level, None);
    }

    #[test]
    fn test_severity_is_case_sensitive() {
        let n = DataProcessor::normalize_record(record("1", "low"));
        assert_eq!(n.severity_level, None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = |y, m, d| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        assert_eq!(DataProcessor::parse_timestamp("2023-04-05"), Some(midnight(2023, 4, 5)));
        assert_eq!(DataProcessor::parse_timestamp("04/05/2023"), Some(midnight(2023, 4, 5)));
        assert_eq!(DataProcessor::parse_timestamp("05-04-2023"), Some(midnight(2023, 4, 5)));
        assert_eq!(
            DataProcessor::parse_timestamp("2023-04-05 14:30:00"),
            NaiveDate::from_ymd_opt(2023, 4, 5).unwrap().and_hms_opt(14, 30, 0)
        );
        assert_eq!(DataProcessor::parse_timestamp("yesterday"), None);
        assert_eq!(DataProcessor::parse_timestamp(""), None);
    }

    #[test]
    fn test_records_from_frame() {
        let df = df!(
            "Accident_ID" => ["1", "2"],
            "City" => ["Pune", "Delhi"],
            "Weather" => ["Rain", "Clear"],
            "Road_Type" => ["Highway", "Urban"],
            "Severity" => ["High", "Low"],
            "Vehicles_Involved" => ["3 cars", "one"],
            "Casualties" => ["2", ""],
            "Date" => ["2023-01-01", "2023-01-02"],
            "Extra" => ["x", "y"]
        )
        .unwrap();

        let records = DataProcessor::records_from_frame(&df).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].city, "Pune");
        assert_eq!(records[1].road_type, "Urban");
        assert_eq!(records[1].casualties, "");
    }

    #[test]
    fn test_missing_column_is_field_absent() {
        let df = df!(
            "Accident_ID" => ["1"],
            "City" => ["Pune"]
        )
        .unwrap();

        match DataProcessor::records_from_frame(&df) {
            Err(ProcessorError::FieldAbsent(name)) => assert_eq!(name, "Weather"),
            other => panic!("expected FieldAbsent, got {other:?}"),
        }
    }
}
