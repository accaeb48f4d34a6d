//! Sidebar selection model

use std::collections::HashSet;

use serde::Deserialize;
use validator::Validate;

use super::{Dataset, Record};

/// Segment option meaning "no restriction"
pub const ALL_SEGMENTS: &str = "All Segments";

/// Network segment choice
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SegmentChoice {
    #[default]
    All,
    Only(String),
}

impl SegmentChoice {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some(ALL_SEGMENTS) => SegmentChoice::All,
            Some(system) => SegmentChoice::Only(system.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SegmentChoice::All => ALL_SEGMENTS,
            SegmentChoice::Only(system) => system,
        }
    }

    /// Exact, case-sensitive match
    pub fn admits(&self, affected_system: &str) -> bool {
        match self {
            SegmentChoice::All => true,
            SegmentChoice::Only(system) => system == affected_system,
        }
    }
}

/// Allowed severities plus segment choice
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub severities: HashSet<String>,
    pub segment: SegmentChoice,
}

impl FilterSelection {
    pub fn new<S: Into<String>>(severities: impl IntoIterator<Item = S>, segment: SegmentChoice) -> Self {
        Self {
            severities: severities.into_iter().map(Into::into).collect(),
            segment,
        }
    }

    /// Default selection: every severity present, all segments
    pub fn all(dataset: &Dataset) -> Self {
        Self::new(dataset.distinct_severities(), SegmentChoice::All)
    }

    /// Build a selection from query parameters.
    ///
    /// A missing `severity` parameter selects every severity; a lone empty
    /// one (`?severity=`) selects none.
    pub fn from_params(params: &SelectionParams, dataset: &Dataset) -> Self {
        let severities = match &params.severity {
            None => dataset.distinct_severities(),
            Some(values) => values.clone(),
        };

        Self::new(severities, SegmentChoice::parse(params.system.as_deref()))
    }

    pub fn admits(&self, record: &Record) -> bool {
        self.severities.contains(&record.severity) && self.segment.admits(&record.affected_system)
    }

    /// Selected severities in dataset order, for echoing back to clients
    pub fn ordered_severities(&self, dataset: &Dataset) -> Vec<String> {
        dataset
            .distinct_severities()
            .into_iter()
            .filter(|s| self.severities.contains(s))
            .collect()
    }
}

/// `?severity=Critical&severity=High&system=SysA`
///
/// `severity` repeats once per selected value, so values may contain commas.
/// Values are taken verbatim, no trimming.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionParams {
    pub severity: Option<Vec<String>>,
    pub system: Option<String>,
}

impl SelectionParams {
    /// Collect decoded query pairs. Unknown keys are ignored and the last
    /// `system` wins.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "severity" => {
                    let value = value.into();
                    let selected = params.severity.get_or_insert_with(Vec::new);
                    if !value.is_empty() {
                        selected.push(value);
                    }
                }
                "system" => params.system = Some(value.into()),
                _ => {}
            }
        }
        params
    }
}

/// `?q=...&limit=...&offset=...`
#[derive(Debug, Deserialize, Validate)]
pub struct TableParams {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    100
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            q: String::new(),
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// `?q=...`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}
