use indexmap::IndexMap;
use serde_json::Value;

use crate::constants::overlay::STATUS_KEY;
use crate::feature::Feature;
use crate::types::StatusText;

/// Aggregate overlay coverage over a merged feature set.
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageStats {
    /// Total features inspected.
    pub total: usize,
    /// Features carrying a non-empty `status` property.
    pub with_status: usize,
    /// `with_status / total`.
    pub share: f64,
    /// Per-status counts, largest first.
    pub by_status: Vec<StatusCount>,
}

/// One status value's share of a merged feature set.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusCount {
    /// Status value.
    pub status: StatusText,
    /// Features currently carrying it.
    pub count: usize,
}

/// Compute overlay coverage for a merged feature set.
///
/// Returns `None` for an empty input. Used by operators to gauge how much
/// of the served baseline carries live status information.
pub fn coverage(features: &[Feature]) -> Option<CoverageStats> {
    if features.is_empty() {
        return None;
    }
    let mut counts: IndexMap<StatusText, usize> = IndexMap::new();
    for feature in features {
        let status = feature
            .properties
            .get(STATUS_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|status| !status.is_empty());
        if let Some(status) = status {
            *counts.entry(status.to_string()).or_insert(0) += 1;
        }
    }
    let with_status: usize = counts.values().sum();
    let mut by_status: Vec<StatusCount> = counts
        .into_iter()
        .map(|(status, count)| StatusCount { status, count })
        .collect();
    by_status.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
    Some(CoverageStats {
        total: features.len(),
        with_status,
        share: with_status as f64 / features.len() as f64,
        by_status,
    })
}
