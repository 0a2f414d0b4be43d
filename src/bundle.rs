//! Dataset reader and per-request bundle composition.
//!
//! Thin glue over the core pieces: load a baseline artifact, assign stable
//! ids, overlay the latest updates, wrap with provenance metadata. Baseline
//! files are produced by external ETL pipelines and only read here.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::category::Category;
use crate::config::AtlasConfig;
use crate::errors::AtlasError;
use crate::feature::{FeatureCollection, Geometry};
use crate::identity::ensure_ids;
use crate::overlay::apply_updates;
use crate::store::UpdateStore;
use crate::types::TimestampText;

/// Categories with a baseline artifact to serve. The remaining categories
/// exist only as update logs until their pipelines come online.
pub const SERVED_CATEGORIES: [Category; 4] = [
    Category::Health,
    Category::Checkpoints,
    Category::Roads,
    Category::Borders,
];

/// Provenance for one category's slice of a bundle.
#[derive(Clone, Debug, Serialize)]
pub struct DatasetMeta {
    /// Category name the slice was built for.
    pub source: String,
    /// Baseline artifact the slice was read from.
    pub path: String,
    /// Number of features served.
    pub records: usize,
}

/// Bundle-level metadata.
#[derive(Clone, Debug, Serialize)]
pub struct BundleMeta {
    /// Categories included in this bundle.
    pub included: Vec<String>,
    /// Per-category provenance.
    pub sources: IndexMap<String, DatasetMeta>,
    /// Ingestion clock value the bundle was built at.
    pub generated_at: TimestampText,
}

/// The served view: merged feature collections plus provenance.
#[derive(Clone, Debug, Serialize)]
pub struct Bundle {
    /// Merged FeatureCollection per included category.
    pub data: IndexMap<String, FeatureCollection>,
    /// Bundle metadata.
    pub meta: BundleMeta,
}

/// Read a baseline GeoJSON FeatureCollection.
///
/// An absent or unreadable artifact is fatal for the request and surfaces
/// as [`AtlasError::MissingBaseline`].
pub fn load_collection(path: impl AsRef<Path>) -> Result<FeatureCollection, AtlasError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|err| AtlasError::MissingBaseline {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|err| AtlasError::MissingBaseline {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })
}

/// Keep only Point features (checkpoint view of the combined extract).
pub fn extract_points(collection: &FeatureCollection) -> FeatureCollection {
    filter_by_geometry(collection, |geometry| {
        matches!(geometry, Geometry::Point { .. })
    })
}

/// Keep only LineString features (road view of the combined extract).
pub fn extract_lines(collection: &FeatureCollection) -> FeatureCollection {
    filter_by_geometry(collection, |geometry| {
        matches!(geometry, Geometry::LineString { .. })
    })
}

fn filter_by_geometry(
    collection: &FeatureCollection,
    keep: impl Fn(&Geometry) -> bool,
) -> FeatureCollection {
    let mut filtered = FeatureCollection::new(
        collection
            .features
            .iter()
            .filter(|feature| keep(&feature.geometry))
            .cloned()
            .collect(),
    );
    filtered.extra = collection.extra.clone();
    filtered
}

/// Build the served bundle for `include`d categories (all served categories
/// when `None`).
///
/// `generated_at` is the explicit ingestion clock: callers capture it once
/// per request so bundle metadata stays deterministic under test.
pub fn build_bundle(
    config: &AtlasConfig,
    store: &UpdateStore,
    include: Option<&[Category]>,
    generated_at: DateTime<Utc>,
) -> Result<Bundle, AtlasError> {
    let mut data = IndexMap::new();
    let mut sources = IndexMap::new();
    let mut included = Vec::new();

    for category in SERVED_CATEGORIES {
        if include.is_some_and(|wanted| !wanted.contains(&category)) {
            continue;
        }
        let (baseline, path) = baseline_for(config, category)?;
        let collection_extra = baseline.extra;
        let features = ensure_ids(baseline.features, category.prefix());
        let latest = store.read_latest(category)?;
        let merged = apply_updates(&features, &latest, "id");
        debug!(
            category = category.as_str(),
            records = merged.len(),
            updates = latest.len(),
            "bundled category"
        );
        sources.insert(
            category.as_str().to_string(),
            DatasetMeta {
                source: category.as_str().to_string(),
                path,
                records: merged.len(),
            },
        );
        included.push(category.as_str().to_string());
        let mut collection = FeatureCollection::new(merged);
        collection.extra = collection_extra;
        data.insert(category.as_str().to_string(), collection);
    }

    Ok(Bundle {
        data,
        meta: BundleMeta {
            included,
            sources,
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        },
    })
}

fn baseline_for(
    config: &AtlasConfig,
    category: Category,
) -> Result<(FeatureCollection, String), AtlasError> {
    let (collection, path) = match category {
        Category::Health => (
            load_collection(&config.health_facilities_path)?,
            &config.health_facilities_path,
        ),
        Category::Checkpoints => (
            extract_points(&load_collection(&config.combined_checkpoints_path)?),
            &config.combined_checkpoints_path,
        ),
        Category::Roads => (
            extract_lines(&load_collection(&config.combined_checkpoints_path)?),
            &config.combined_checkpoints_path,
        ),
        Category::Borders => (
            load_collection(&config.border_crossings_path)?,
            &config.border_crossings_path,
        ),
        other => {
            return Err(AtlasError::MissingBaseline {
                path: config.updates_dir.join(other.as_str()),
                detail: format!("category '{other}' has no baseline artifact"),
            })
        }
    };
    Ok((collection, path.display().to_string()))
}
