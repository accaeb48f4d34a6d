//! Aggregate summary model

use serde::Serialize;

use super::HourBucket;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub active_alerts: usize,
    pub critical_count: usize,
    /// `None` when no record in the view carries a response time
    pub avg_response_time: Option<f64>,
    pub hourly_series: Vec<HourlyPoint>,
    pub vector_breakdown: Vec<VectorShare>,
    pub top_threat: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub hour: HourBucket,
    pub incidents: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorShare {
    pub threat_type: String,
    pub count: usize,
    /// Share of active alerts, 0..=100
    pub percentage: f64,
}
