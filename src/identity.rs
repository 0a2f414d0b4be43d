//! Deterministic feature identity derivation.
//!
//! Upstream sources rarely carry a durable identifier, yet update records
//! must be matched to features across independent ingestion runs. Identity
//! is therefore derived from what the feature itself pins down: rounded
//! coordinates plus a normalized name. Same geometry and name, same id, on
//! every run and every host.

use serde_json::Value;

use crate::constants::identity::{
    COORD_SCALE, ID_ALIASES, KEY_DELIMITER, LINE_REF_ALIASES, POINT_NAME_ALIASES, PREFIX_DELIMITER,
};
use crate::feature::{Feature, Geometry};
use crate::hash::short_digest;
use crate::types::IdentityKey;
use crate::utils::{first_present, normalize_name};

/// Return `features` with every member carrying a string `properties.id`.
///
/// Features that already expose an id under one of the known aliases keep
/// it unchanged (coerced to a string). For the rest an id is derived from
/// geometry and name and prefixed with `prefix`, e.g. `border:1a2b3c4d5e`.
///
/// This is a pure transform: the returned features are new values and the
/// caller's input is consumed, never shared. Nameless features without
/// coordinates fall back to a `(0, 0)` key and will collide; the ingest
/// contract accepts that approximation.
pub fn ensure_ids(features: Vec<Feature>, prefix: &str) -> Vec<Feature> {
    features
        .into_iter()
        .map(|feature| ensure_id(feature, prefix))
        .collect()
}

fn ensure_id(mut feature: Feature, prefix: &str) -> Feature {
    let id = match first_present(&feature.properties, &ID_ALIASES) {
        Some(existing) => existing,
        None => {
            let key = identity_key(&feature);
            format!("{prefix}{PREFIX_DELIMITER}{}", short_digest(&key))
        }
    };
    feature.properties.insert("id".to_string(), Value::String(id));
    feature
}

/// Composite key for a feature lacking an upstream id.
fn identity_key(feature: &Feature) -> IdentityKey {
    let (lon, lat, label) = match &feature.geometry {
        Geometry::Point { coordinates } => {
            let lon = coordinates.first().copied().unwrap_or(0.0);
            let lat = coordinates.get(1).copied().unwrap_or(0.0);
            let name = first_present(&feature.properties, &POINT_NAME_ALIASES).unwrap_or_default();
            (lon, lat, name)
        }
        Geometry::LineString { coordinates } => {
            let first = coordinates.first();
            let lon = first.and_then(|pair| pair.first()).copied().unwrap_or(0.0);
            let lat = first.and_then(|pair| pair.get(1)).copied().unwrap_or(0.0);
            let label = first_present(&feature.properties, &LINE_REF_ALIASES).unwrap_or_default();
            (lon, lat, label)
        }
        Geometry::Other(_) => {
            let label = first_present(&feature.properties, &LINE_REF_ALIASES).unwrap_or_default();
            (0.0, 0.0, label)
        }
    };
    format!(
        "{}{KEY_DELIMITER}{}{KEY_DELIMITER}{}",
        round_coord(lon),
        round_coord(lat),
        normalize_name(label)
    )
}

/// Round a coordinate to 5 decimal places (~1 m at the equator).
fn round_coord(value: f64) -> f64 {
    (value * COORD_SCALE).round() / COORD_SCALE
}
