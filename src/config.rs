use std::path::PathBuf;

/// Filesystem layout and serving knobs for the dashboard data directory.
///
/// Baseline artifacts are produced by out-of-process ETL pipelines; this
/// crate only reads them. The update logs live under `updates_dir` and are
/// owned by [`UpdateStore`](crate::UpdateStore).
#[derive(Clone, Debug)]
pub struct AtlasConfig {
    /// Baseline GeoJSON for health facilities.
    pub health_facilities_path: PathBuf,
    /// Combined Overpass extract holding checkpoint Points and road
    /// LineStrings in one FeatureCollection.
    pub combined_checkpoints_path: PathBuf,
    /// Baseline GeoJSON for border crossings.
    pub border_crossings_path: PathBuf,
    /// Directory of per-category append logs.
    pub updates_dir: PathBuf,
    /// Suggested response-cache TTL handed to the HTTP layer. The core
    /// holds no cache state itself.
    pub cache_ttl_secs: u64,
}

impl AtlasConfig {
    /// Standard layout rooted at a data directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            health_facilities_path: data_dir
                .join("health_centers")
                .join("health_facilities.json"),
            combined_checkpoints_path: data_dir
                .join("checkpoints")
                .join("roads_checkpoints.geojson"),
            border_crossings_path: data_dir.join("borders").join("border_crossings.geojson"),
            updates_dir: data_dir.join("updates"),
            cache_ttl_secs: 300,
        }
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self::with_data_dir("aid_dashboard_data")
    }
}
