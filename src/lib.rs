#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Per-request bundle composition over baselines, ids, and overlays.
pub mod bundle;
/// Update-log category partitions.
pub mod category;
/// Data directory layout and serving knobs.
pub mod config;
/// Centralized constants used across identity, logs, and overlay.
pub mod constants;
/// GeoJSON feature and collection types.
pub mod feature;
mod hash;
/// Deterministic feature identity derivation.
pub mod identity;
/// Overlay coverage metrics.
pub mod metrics;
/// Overlay merger applying latest updates onto baselines.
pub mod overlay;
/// Append-only per-category update log store.
pub mod store;
/// Shared type aliases.
pub mod types;
/// Update record model and validation.
pub mod update;
/// Text normalization and property lookup helpers.
pub mod utils;

mod errors;

pub use bundle::{build_bundle, load_collection, Bundle, BundleMeta, DatasetMeta};
pub use category::Category;
pub use config::AtlasConfig;
pub use errors::AtlasError;
pub use feature::{Feature, FeatureCollection, Geometry};
pub use identity::ensure_ids;
pub use metrics::{coverage, CoverageStats, StatusCount};
pub use overlay::apply_updates;
pub use store::{load_updates, LatestById, UpdateStore};
pub use types::{FeatureId, IdentityKey, StatusText, Tag, TimestampText};
pub use update::{normalize_timestamp, parse_timestamp, UpdateRecord};
