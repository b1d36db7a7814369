//! Accident record types

use chrono::NaiveDateTime;

/// One row of the source table, every field as raw text.
///
/// A null cell in the source becomes an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccidentRecord {
    pub accident_id: String,
    pub city: String,
    pub weather: String,
    pub road_type: String,
    pub severity: String,
    pub vehicles_involved: String,
    pub casualties: String,
    pub date: String,
}

/// Accident severity with a fixed ordinal weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Exact, case-sensitive label lookup. Unknown labels have no severity.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(Severity::Low),
            "Medium" => Some(Severity::Medium),
            "High" => Some(Severity::High),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }
}

/// An [`AccidentRecord`] with its derived fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub record: AccidentRecord,
    /// First digit run of `Vehicles_Involved`, 0 when there is none.
    pub vehicles_involved_count: u64,
    /// First digit run of `Casualties`, 0 when there is none.
    pub casualties_count: u64,
    /// 1..=3, absent for labels outside Low/Medium/High.
    pub severity_level: Option<u8>,
    pub occurred_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_map_to_levels() {
        assert_eq!(Severity::from_label("Low").map(Severity::level), Some(1));
        assert_eq!(Severity::from_label("Medium").map(Severity::level), Some(2));
        assert_eq!(Severity::from_label("High").map(Severity::level), Some(3));
    }

    #[test]
    fn test_other_labels_have_no_severity() {
        for label in ["low", "HIGH", " High", "Unknown", "", "Critical"] {
            assert_eq!(Severity::from_label(label), None, "label {label:?}");
        }
    }
}
