//! Overlay merger: current status fields applied onto baseline features.
//!
//! Baseline collections are shared, cached inputs; one request's overlay
//! must never be visible to another. The merge therefore builds new
//! features and leaves every input untouched.

use indexmap::IndexMap;
use serde_json::Value;

use crate::constants::overlay::{
    STATUS_CONFIDENCE_KEY, STATUS_KEY, STATUS_SOURCE_KEY, STATUS_UNKNOWN, STATUS_VERIFIED_AT_KEY,
};
use crate::feature::Feature;
use crate::types::FeatureId;
use crate::update::UpdateRecord;

/// Merge the latest update per id onto `features`.
///
/// A feature whose `properties[id_field]` has a current update gets
/// `status`, `status_verified_at`, `status_source`, and `status_confidence`
/// added or overwritten; absent optional fields become explicit `null`, and
/// an empty status becomes the literal `"unknown"`. Features without an
/// update pass through unchanged. Output order matches input order.
pub fn apply_updates(
    features: &[Feature],
    latest_by_id: &IndexMap<FeatureId, UpdateRecord>,
    id_field: &str,
) -> Vec<Feature> {
    features
        .iter()
        .map(|feature| {
            let update = feature
                .properties
                .get(id_field)
                .and_then(Value::as_str)
                .and_then(|id| latest_by_id.get(id));
            match update {
                Some(update) => overlaid(feature, update),
                None => feature.clone(),
            }
        })
        .collect()
}

fn overlaid(feature: &Feature, update: &UpdateRecord) -> Feature {
    let mut merged = feature.clone();
    let status = if update.status.trim().is_empty() {
        STATUS_UNKNOWN.to_string()
    } else {
        update.status.clone()
    };
    merged
        .properties
        .insert(STATUS_KEY.to_string(), Value::String(status));
    merged.properties.insert(
        STATUS_VERIFIED_AT_KEY.to_string(),
        Value::String(update.verified_at.clone()),
    );
    merged.properties.insert(
        STATUS_SOURCE_KEY.to_string(),
        update
            .source
            .clone()
            .map_or(Value::Null, Value::String),
    );
    merged.properties.insert(
        STATUS_CONFIDENCE_KEY.to_string(),
        update.confidence.clone().unwrap_or(Value::Null),
    );
    merged
}
