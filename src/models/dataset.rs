//! Dataset and filtered views

use chrono::NaiveDateTime;

use super::Record;

/// Immutable in-memory copy of the alert file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Column names in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unfiltered view over every record
    pub fn view(&self) -> View<'_> {
        View::new(&self.columns, self.records.iter().collect())
    }

    /// Earliest and latest parsed timestamps, if any
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut stamps = self.records.iter().filter_map(|r| r.timestamp);
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts))))
    }

    /// Distinct severities in order of first appearance
    pub fn distinct_severities(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.severity.as_str()))
    }

    /// Distinct network segments in order of first appearance
    pub fn distinct_systems(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.affected_system.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Ordered subsequence of a dataset's records.
///
/// Views borrow the dataset, so deriving one never copies or mutates rows.
#[derive(Debug, Clone)]
pub struct View<'a> {
    columns: &'a [String],
    rows: Vec<&'a Record>,
}

impl<'a> View<'a> {
    pub fn new(columns: &'a [String], rows: Vec<&'a Record>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().copied()
    }

    /// Keep the rows matching `predicate`, preserving order
    pub fn retain_where(&self, mut predicate: impl FnMut(&Record) -> bool) -> View<'a> {
        View::new(
            self.columns,
            self.rows.iter().copied().filter(|r| predicate(r)).collect(),
        )
    }
}

/// Two views are equal when they hold the same rows of the same dataset.
impl PartialEq for View<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.rows.len() == other.rows.len()
            && self
                .rows
                .iter()
                .zip(&other.rows)
                .all(|(a, b)| std::ptr::eq(*a, *b))
    }
}
