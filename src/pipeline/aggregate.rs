//! Aggregation layer
//!
//! KPI scalars and chart projections derived from a filtered view.

use std::collections::{BTreeMap, HashMap};

use crate::models::{HourBucket, HourlyPoint, Summary, VectorShare, View};

/// Severity counted by the "Critical Threats" tile
pub const CRITICAL: &str = "Critical";

pub fn summarize(view: &View<'_>) -> Summary {
    let active_alerts = view.len();
    let vector_breakdown = vector_breakdown(view);

    Summary {
        active_alerts,
        critical_count: view.iter().filter(|r| r.severity == CRITICAL).count(),
        avg_response_time: avg_response_time(view),
        hourly_series: hourly_series(view),
        top_threat: top_threat(&vector_breakdown),
        vector_breakdown,
    }
}

/// Mean of the response times present in the view
pub fn avg_response_time(view: &View<'_>) -> Option<f64> {
    let (sum, n) = view
        .iter()
        .filter_map(|r| r.response_time_minutes)
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));

    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// Incident count per hour bucket, ascending
pub fn hourly_series(view: &View<'_>) -> Vec<HourlyPoint> {
    let mut buckets: BTreeMap<&HourBucket, usize> = BTreeMap::new();
    for record in view.iter() {
        *buckets.entry(&record.hour).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|(hour, incidents)| HourlyPoint {
            hour: hour.clone(),
            incidents,
        })
        .collect()
}

/// Count and share per threat type, in order of first appearance
pub fn vector_breakdown(view: &View<'_>) -> Vec<VectorShare> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut shares: Vec<VectorShare> = Vec::new();

    for record in view.iter() {
        let slot = *index.entry(record.threat_type.as_str()).or_insert_with(|| {
            shares.push(VectorShare {
                threat_type: record.threat_type.clone(),
                count: 0,
                percentage: 0.0,
            });
            shares.len() - 1
        });
        shares[slot].count += 1;
    }

    let total = view.len() as f64;
    for share in &mut shares {
        share.percentage = share.count as f64 / total * 100.0;
    }

    shares
}

/// Most frequent threat type.
///
/// Ties go to the type seen first in the view; `shares` must be in
/// first-appearance order as produced by [`vector_breakdown`].
pub fn top_threat(shares: &[VectorShare]) -> Option<String> {
    shares
        .iter()
        .fold(None::<&VectorShare>, |best, share| match best {
            Some(b) if b.count >= share.count => Some(b),
            _ => Some(share),
        })
        .map(|s| s.threat_type.clone())
}
