use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GeoJSON geometry carried by baseline features.
///
/// Point and LineString are the shapes this system reasons about; anything
/// else upstream produces is carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// `[lon, lat]` position.
    Point {
        /// Longitude, latitude.
        coordinates: Vec<f64>,
    },
    /// Ordered `[lon, lat]` positions.
    LineString {
        /// Longitude/latitude pairs.
        coordinates: Vec<Vec<f64>>,
    },
    /// Any other GeoJSON geometry, preserved verbatim.
    #[serde(untagged)]
    Other(Value),
}

fn feature_tag() -> String {
    "Feature".to_string()
}

fn collection_tag() -> String {
    "FeatureCollection".to_string()
}

/// One baseline geographic record: geometry plus an open property map.
///
/// Properties are deliberately untyped; upstream sources attach arbitrary
/// attributes (OSM tags, shapefile columns) that must survive round-trips.
/// Top-level members outside the GeoJSON core (`bbox`, the RFC 7946
/// feature-level `id`, foreign members) are preserved in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_tag")]
    tag: String,
    /// Feature geometry.
    pub geometry: Geometry,
    /// Open property map; `properties.id` is the stable identity key.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Top-level members outside the core schema, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feature {
    /// Build a feature from geometry and properties.
    pub fn new(geometry: Geometry, properties: Map<String, Value>) -> Self {
        Self {
            tag: feature_tag(),
            geometry,
            properties,
            extra: Map::new(),
        }
    }

    /// The feature's `properties.id` as a string, if present.
    pub fn id(&self) -> Option<&str> {
        self.properties.get("id").and_then(Value::as_str)
    }
}

/// GeoJSON FeatureCollection, the unit of exchange with the ETL pipelines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_tag")]
    tag: String,
    /// Member features.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Collection-level members outside the core schema (`bbox`, foreign
    /// members), preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FeatureCollection {
    /// Build a collection from features.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            tag: collection_tag(),
            features,
            extra: Map::new(),
        }
    }
}
