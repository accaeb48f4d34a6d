//! Report layer - KPI tiles, summary sentence and table pages

use serde::Serialize;

use crate::models::{Summary, View};

/// Shown instead of an average when there is nothing to average
pub const NO_DATA: &str = "No data";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiTile {
    pub label: &'static str,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<&'static str>,
}

/// The four header tiles. `system_health` is a configured static value.
pub fn kpi_tiles(summary: &Summary, system_health: &str) -> Vec<KpiTile> {
    vec![
        KpiTile {
            label: "Active Alerts",
            value: summary.active_alerts.to_string(),
            delta: None,
        },
        KpiTile {
            label: "Critical Threats",
            value: summary.critical_count.to_string(),
            delta: Some("-2% vs Yesterday"),
        },
        KpiTile {
            label: "System Health",
            value: system_health.to_string(),
            delta: Some("Optimal"),
        },
        KpiTile {
            label: "Avg Resp Time",
            value: format_response_time(summary.avg_response_time),
            delta: None,
        },
    ]
}

pub fn format_response_time(avg: Option<f64>) -> String {
    match avg {
        Some(minutes) => format!("{:.1}m", minutes),
        None => NO_DATA.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeLevel {
    Info,
    Warning,
}

/// Automated one-line conclusion under the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Narrative {
    pub level: NarrativeLevel,
    pub message: String,
}

pub fn narrative(summary: &Summary) -> Narrative {
    match &summary.top_threat {
        Some(threat) => Narrative {
            level: NarrativeLevel::Info,
            message: format!(
                "The primary threat vector currently identified is {}. \
                 We recommend immediate audit of logs associated with this activity.",
                threat
            ),
        },
        None => Narrative {
            level: NarrativeLevel::Warning,
            message: "No incidents match the selected filters. System appears clear.".to_string(),
        },
    }
}

/// One page of the event investigation table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

impl TablePage {
    pub fn from_view(view: &View<'_>, offset: usize, limit: usize) -> Self {
        let rows: Vec<Vec<String>> = view
            .iter()
            .skip(offset)
            .take(limit)
            .map(|r| r.values.clone())
            .collect();

        Self {
            columns: view.columns().to_vec(),
            has_more: offset.saturating_add(rows.len()) < view.len(),
            total: view.len(),
            rows,
            offset,
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::sample_dataset;
    use crate::pipeline::summarize;

    #[test]
    fn test_kpi_tiles() {
        let dataset = sample_dataset();
        let tiles = kpi_tiles(&summarize(&dataset.view()), "98.2%");

        let values: Vec<_> = tiles.iter().map(|t| (t.label, t.value.as_str())).collect();
        assert_eq!(values, vec![
            ("Active Alerts", "3"),
            ("Critical Threats", "2"),
            ("System Health", "98.2%"),
            ("Avg Resp Time", "10.0m"),
        ]);
    }

    #[test]
    fn test_response_time_formatting() {
        assert_eq!(format_response_time(Some(7.26)), "7.3m");
        assert_eq!(format_response_time(None), NO_DATA);
    }

    #[test]
    fn test_narrative() {
        let dataset = sample_dataset();
        let info = narrative(&summarize(&dataset.view()));
        assert_eq!(info.level, NarrativeLevel::Info);
        assert!(info.message.contains("is Phishing."));

        let empty = View::new(dataset.columns(), Vec::new());
        let warning = narrative(&summarize(&empty));
        assert_eq!(warning.level, NarrativeLevel::Warning);
        assert_eq!(warning.message, "No incidents match the selected filters. System appears clear.");
    }

    #[test]
    fn test_table_paging() {
        let dataset = sample_dataset();
        let view = dataset.view();

        let first = TablePage::from_view(&view, 0, 2);
        assert_eq!(first.rows.len(), 2);
        assert_eq!(first.total, 3);
        assert!(first.has_more);
        assert_eq!(first.columns, dataset.columns());

        let last = TablePage::from_view(&view, 2, 2);
        assert_eq!(last.rows.len(), 1);
        assert_eq!(last.rows[0][2], "SysB");
        assert!(!last.has_more);

        let past_end = TablePage::from_view(&view, 10, 2);
        assert!(past_end.rows.is_empty());
        assert!(!past_end.has_more);
    }
}
