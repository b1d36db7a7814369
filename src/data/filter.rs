//! Filter Engine
//! Narrows normalized records to a user selection of city, weather and severity.

use crate::data::record::NormalizedRecord;
use std::collections::HashSet;

/// Distinct values observed per filterable field, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub weather: Vec<String>,
    pub severities: Vec<String>,
}

impl FilterOptions {
    pub fn observe<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a NormalizedRecord>,
    {
        let mut options = Self::default();
        let mut seen: [HashSet<&str>; 3] = Default::default();

        for r in records {
            let fields = [
                (&r.record.city, &mut options.cities),
                (&r.record.weather, &mut options.weather),
                (&r.record.severity, &mut options.severities),
            ];
            for (seen, (value, out)) in seen.iter_mut().zip(fields) {
                if seen.insert(value.as_str()) {
                    out.push(value.clone());
                }
            }
        }

        options
    }
}

/// Allowed values per field. A record passes only if all three contain it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub cities: HashSet<String>,
    pub weather: HashSet<String>,
    pub severities: HashSet<String>,
}

impl FilterSelection {
    /// Everything observed is selected.
    pub fn all(options: &FilterOptions) -> Self {
        Self {
            cities: options.cities.iter().cloned().collect(),
            weather: options.weather.iter().cloned().collect(),
            severities: options.severities.iter().cloned().collect(),
        }
    }

    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        self.cities.contains(&record.record.city)
            && self.weather.contains(&record.record.weather)
            && self.severities.contains(&record.record.severity)
    }
}

/// Read-only, ordered subsequence of the normalized table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a NormalizedRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a NormalizedRecord> + '_ {
        self.rows.iter().copied()
    }
}

impl<'a, 'b> IntoIterator for &'b FilteredView<'a> {
    type Item = &'a NormalizedRecord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'b, &'a NormalizedRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter().copied()
    }
}

/// Keep the records whose city, weather and severity are all selected.
///
/// Matching is exact and case-sensitive on the raw text. An empty set in the
/// selection produces an empty view.
pub fn filter_records<'a, I>(records: I, selection: &FilterSelection) -> FilteredView<'a>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    FilteredView {
        rows: records
            .into_iter()
            .filter(|r| selection.matches(r))
            .collect(),
    }
}
