//! Free-text row search

use crate::models::{Record, View};

/// Joins `column: value` pairs in a serialized row
pub const FIELD_SEPARATOR: &str = " | ";

/// Whole-row text used for matching: `column: value` pairs in file column
/// order, joined by [`FIELD_SEPARATOR`].
pub fn row_text(columns: &[String], record: &Record) -> String {
    columns
        .iter()
        .zip(&record.values)
        .map(|(column, value)| format!("{}: {}", column, value))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

/// Rows whose serialized text contains `query`, ignoring case.
///
/// Plain substring match. An empty query returns the view as is.
pub fn search<'a>(view: &View<'a>, query: &str) -> View<'a> {
    if query.is_empty() {
        return view.clone();
    }

    let needle = query.to_lowercase();
    let columns = view.columns();
    view.retain_where(|record| row_text(columns, record).to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::sample_dataset;

    #[test]
    fn test_row_text_format() {
        let dataset = sample_dataset();
        let text = row_text(dataset.columns(), &dataset.records()[0]);

        assert_eq!(
            text,
            "timestamp: 2024-03-01 01:15:00 | severity: Critical | affected_system: SysA | \
             threat_type: Phishing | response_time_minutes: 5.0 | hour: 1 | source_ip: 10.0.0.5"
        );
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let dataset = sample_dataset();
        let view = search(&dataset.view(), "sysb");

        assert_eq!(view.len(), 1);
        assert!(std::ptr::eq(view.rows()[0], &dataset.records()[2]));
    }

    #[test]
    fn test_search_matches_extra_columns() {
        let dataset = sample_dataset();
        let view = search(&dataset.view(), "192.168.");

        assert_eq!(view.len(), 1);
        assert_eq!(view.rows()[0].affected_system, "SysB");
    }

    #[test]
    fn test_empty_query_is_identity() {
        let dataset = sample_dataset();
        assert_eq!(search(&dataset.view(), ""), dataset.view());
    }

    #[test]
    fn test_query_is_not_a_regex() {
        let dataset = sample_dataset();
        assert!(search(&dataset.view(), "Sys.").is_empty());
        assert_eq!(search(&dataset.view(), "10.0.0.").len(), 2);
    }

    #[test]
    fn test_search_result_is_subset() {
        let dataset = sample_dataset();
        let full = dataset.view();

        for query in ["critical", "phish", "SYSA", "nothing-matches", "1"] {
            let found = search(&full, query);
            assert!(found.len() <= full.len());
            assert!(found
                .iter()
                .all(|r| full.iter().any(|f| std::ptr::eq(r, f))));
        }
    }
}
