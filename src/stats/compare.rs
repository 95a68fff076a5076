use std::cmp::Ordering;

use serde::Serialize;

use super::company::CompanySummary;

/// One side-by-side figure in compare mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub label: &'static str,
    pub a: f64,
    pub b: f64,
}

impl MetricRow {
    /// `a / b`, or `None` when `b` is not positive.
    pub fn ratio(&self) -> Option<f64> {
        (self.b > 0.0).then(|| self.a / self.b)
    }

    pub fn direction(&self) -> Ordering {
        self.a.partial_cmp(&self.b).unwrap_or(Ordering::Equal)
    }
}

type Metric = fn(&CompanySummary<'_>) -> f64;

/// Figures shown in the comparison panel, in display order.
pub fn compare_summaries(a: &CompanySummary<'_>, b: &CompanySummary<'_>) -> Vec<MetricRow> {
    let row = |label: &'static str, f: Metric| MetricRow {
        label,
        a: f(a),
        b: f(b),
    };
    vec![
        row("Companies", |s| s.caps.count as f64),
        row("Total Market Cap", |s| s.caps.sum),
        row("Avg Market Cap", |s| s.caps.mean),
        row("Median Market Cap", |s| s.caps.median),
        row("Employees", |s| s.total_employees as f64),
        row("HHI Index", |s| s.caps.hhi.round()),
        row("States", |s| s.states as f64),
    ]
}
