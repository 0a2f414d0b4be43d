//! Update record model and validation.
//!
//! Records are append-only: once written to a log they are never edited.
//! History accumulates per feature id and reads reduce it to the newest
//! record by `verified_at`.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::Category;
use crate::errors::AtlasError;
use crate::types::{FeatureId, StatusText, Tag, TimestampText};

/// One community-submitted status report for a feature.
///
/// `id`, `status`, and `verified_at` are the only schema-validated fields;
/// everything else is carried as submitted. Unknown payload fields are
/// preserved in `extra` so the log never loses information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Feature identity this report refers to.
    pub id: FeatureId,
    /// Category whose log owns this record.
    pub category: Category,
    /// Reported status value.
    pub status: StatusText,
    /// Verification timestamp, normalized to ISO-8601 UTC `Z` form.
    pub verified_at: TimestampText,
    /// Human-readable feature name, when the reporter supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Attribution for the report (organization, feed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Individual reporter handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Submitter-assigned priority marker (string or number, as submitted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
    /// Submitter-assigned confidence marker (string or number, as submitted).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Value>,
    /// Deduplicated tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<Tag>>,
    /// Fields outside the known schema, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UpdateRecord {
    /// Minimal record with only the required fields populated.
    pub fn new(
        category: Category,
        id: impl Into<FeatureId>,
        status: impl Into<StatusText>,
        verified_at: impl Into<TimestampText>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            status: status.into(),
            verified_at: verified_at.into(),
            name: None,
            source: None,
            reporter: None,
            notes: None,
            priority: None,
            confidence: None,
            tags: None,
            extra: Map::new(),
        }
    }

    /// Validate required fields and normalize `verified_at` to `Z` form.
    ///
    /// Rejected records must never reach a log, so this consumes and
    /// returns the record: callers append only what validation produced.
    pub fn validated(mut self) -> Result<Self, AtlasError> {
        if self.id.trim().is_empty() {
            return Err(AtlasError::validation("id is required"));
        }
        if self.status.trim().is_empty() {
            return Err(AtlasError::validation("status is required"));
        }
        self.verified_at = normalize_timestamp(&self.verified_at)?;
        Ok(self)
    }

    /// Parsed `verified_at`, or `None` when the stored text is malformed.
    ///
    /// Reduction treats `None` as the minimum possible timestamp, so a
    /// record with a broken timestamp loses to any parseable one.
    pub fn verified_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.verified_at).ok()
    }
}

/// Parse an ISO-8601 timestamp, accepting `Z`, numeric offsets, and naive
/// date/datetime forms (interpreted as UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, AtlasError> {
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }
    Err(AtlasError::validation(format!(
        "verified_at must be ISO-8601, e.g. 2025-08-19T13:45:00Z (got '{trimmed}')"
    )))
}

/// Normalize a timestamp to RFC 3339 UTC with a `Z` suffix.
pub fn normalize_timestamp(raw: &str) -> Result<TimestampText, AtlasError> {
    let parsed = parse_timestamp(raw)?;
    Ok(parsed.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}
