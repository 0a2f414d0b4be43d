use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::updates::LOG_EXTENSION;
use crate::errors::AtlasError;

/// Dataset partition for update logs and id prefixes.
///
/// Every category owns one append-only log file; feature ids are unique
/// within a category but not across categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Health facilities (clinics, hospitals).
    Health,
    /// Road checkpoints (Point features).
    Checkpoints,
    /// Border crossings.
    Borders,
    /// Major roads (LineString features).
    Roads,
    /// Food distribution points.
    Food,
    /// Water access points.
    Water,
    /// Shelter locations.
    Shelters,
}

impl Category {
    /// All categories, in canonical order.
    pub const ALL: [Category; 7] = [
        Category::Health,
        Category::Checkpoints,
        Category::Borders,
        Category::Roads,
        Category::Food,
        Category::Water,
        Category::Shelters,
    ];

    /// Canonical lowercase name used in log filenames and wire payloads.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Checkpoints => "checkpoints",
            Category::Borders => "borders",
            Category::Roads => "roads",
            Category::Food => "food",
            Category::Water => "water",
            Category::Shelters => "shelters",
        }
    }

    /// Singular prefix prepended to derived feature ids, e.g. `border:`.
    pub const fn prefix(&self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Checkpoints => "checkpoint",
            Category::Borders => "border",
            Category::Roads => "road",
            Category::Food => "food",
            Category::Water => "water",
            Category::Shelters => "shelter",
        }
    }

    /// Filename of this category's append log, e.g. `borders.jsonl`.
    pub fn log_file_name(&self) -> String {
        format!("{}.{}", self.as_str(), LOG_EXTENSION)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| AtlasError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "invalid_cat".parse::<Category>().unwrap_err();
        assert!(matches!(err, AtlasError::UnknownCategory(name) if name == "invalid_cat"));
    }

    #[test]
    fn log_file_names_use_plural_category_names() {
        assert_eq!(Category::Borders.log_file_name(), "borders.jsonl");
        assert_eq!(Category::Checkpoints.log_file_name(), "checkpoints.jsonl");
    }

    #[test]
    fn id_prefixes_are_singular() {
        assert_eq!(Category::Borders.prefix(), "border");
        assert_eq!(Category::Roads.prefix(), "road");
        assert_eq!(Category::Health.prefix(), "health");
    }
}
