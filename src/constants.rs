/// Constants used by feature identity derivation.
pub mod identity {
    /// Property aliases checked, in order, for a pre-existing feature id.
    pub const ID_ALIASES: [&str; 3] = ["id", "@id", "osm_id"];
    /// Property aliases checked, in order, for a Point feature's name.
    pub const POINT_NAME_ALIASES: [&str; 2] = ["name", "NAME"];
    /// Property aliases checked, in order, for a LineString feature's label.
    pub const LINE_REF_ALIASES: [&str; 2] = ["ref", "name"];
    /// Hex characters kept from the identity digest.
    pub const SHORT_DIGEST_LEN: usize = 10;
    /// Scale factor rounding coordinates to 5 decimal places (~1 m).
    pub const COORD_SCALE: f64 = 1e5;
    /// Separator between the components of an identity key.
    pub const KEY_DELIMITER: &str = "|";
    /// Separator between a category prefix and the digest.
    pub const PREFIX_DELIMITER: &str = ":";
}

/// Constants used by the update log store.
pub mod updates {
    /// File extension of per-category append logs.
    pub const LOG_EXTENSION: &str = "jsonl";
    /// CSV headers that bulk ingestion requires (case-insensitive).
    pub const REQUIRED_CSV_HEADERS: [&str; 3] = ["id", "status", "verified_at"];
    /// Delimiter splitting a CSV `tags` cell into individual tags.
    pub const TAGS_DELIMITER: char = '|';
}

/// Constants used by the overlay merger.
pub mod overlay {
    /// Property key receiving the current status value.
    pub const STATUS_KEY: &str = "status";
    /// Property key receiving the status verification timestamp.
    pub const STATUS_VERIFIED_AT_KEY: &str = "status_verified_at";
    /// Property key receiving the update's source attribution.
    pub const STATUS_SOURCE_KEY: &str = "status_source";
    /// Property key receiving the update's confidence marker.
    pub const STATUS_CONFIDENCE_KEY: &str = "status_confidence";
    /// Status value substituted when an update carries an empty status.
    pub const STATUS_UNKNOWN: &str = "unknown";
}
