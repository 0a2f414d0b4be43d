//! Append-only update log store.
//!
//! Ownership model:
//! - `UpdateStore` exclusively owns the updates directory; one JSONL file
//!   per category, created on first write, growing monotonically.
//! - Reads never mutate; they stream the log and reduce to the newest
//!   record per feature id.
//!
//! There is no in-process locking. Correctness under concurrent writers
//! relies on the filesystem's append atomicity at line granularity; this is
//! a known limitation of the single-process deployment model.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::category::Category;
use crate::constants::updates::{REQUIRED_CSV_HEADERS, TAGS_DELIMITER};
use crate::errors::AtlasError;
use crate::types::FeatureId;
use crate::update::UpdateRecord;

/// Reduced log view: the current record per feature id, in first-encounter
/// order.
pub type LatestById = IndexMap<FeatureId, UpdateRecord>;

/// Per-category append-only store of status update records.
#[derive(Clone, Debug)]
pub struct UpdateStore {
    root: PathBuf,
}

impl UpdateStore {
    /// Create a store rooted at the updates directory.
    ///
    /// The directory is created lazily on first append, so constructing a
    /// store never touches the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The updates directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a category's append log, e.g. `<root>/borders.jsonl`.
    pub fn log_path(&self, category: Category) -> PathBuf {
        self.root.join(category.log_file_name())
    }

    /// Validate `record` and append it to `category`'s log.
    ///
    /// The record is stamped with `category`, its timestamp normalized to
    /// `Z` form, and written as one newline-terminated JSON line. A
    /// validation rejection leaves the log untouched. Returns the record
    /// exactly as persisted.
    pub fn append(
        &self,
        category: Category,
        record: UpdateRecord,
    ) -> Result<UpdateRecord, AtlasError> {
        let mut record = record;
        record.category = category;
        let record = record.validated()?;
        let line = serde_json::to_string(&record)?;
        self.append_lines(category, std::iter::once(line))?;
        Ok(record)
    }

    /// Reduce `category`'s log to the newest record per feature id.
    ///
    /// A missing log yields an empty map. Unparseable lines are skipped
    /// silently; one corrupt line never fails the whole read.
    pub fn read_latest(&self, category: Category) -> Result<LatestById, AtlasError> {
        load_updates(self.log_path(category))
    }

    /// The reduced records of `category`'s log, newest first.
    ///
    /// Admin listing view: same reduction as [`read_latest`], sorted by
    /// `verified_at` descending (encounter order preserved on ties).
    ///
    /// [`read_latest`]: UpdateStore::read_latest
    pub fn latest_rows(&self, category: Category) -> Result<Vec<UpdateRecord>, AtlasError> {
        let mut rows: Vec<UpdateRecord> = self.read_latest(category)?.into_values().collect();
        rows.sort_by(|a, b| reduction_timestamp(b).cmp(&reduction_timestamp(a)));
        Ok(rows)
    }

    /// Ingest a batch of records in one of three auto-detected shapes:
    /// a JSON array, newline-delimited JSON, or CSV with a header row.
    ///
    /// Every accepted record is stamped with `category` and validated
    /// exactly as in [`append`]; invalid records are dropped silently and
    /// not counted. Returns the number of records appended.
    ///
    /// [`append`]: UpdateStore::append
    pub fn bulk_append(&self, category: Category, text: &str) -> Result<usize, AtlasError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AtlasError::validation("no data provided"));
        }
        let records = if looks_like_json(text) {
            parse_json_records(category, trimmed)?
        } else {
            parse_csv_records(category, trimmed)?
        };
        let mut lines = Vec::with_capacity(records.len());
        for record in &records {
            lines.push(serde_json::to_string(record)?);
        }
        self.append_lines(category, lines.into_iter())?;
        debug!(
            category = category.as_str(),
            appended = records.len(),
            "bulk ingestion complete"
        );
        Ok(records.len())
    }

    fn append_lines(
        &self,
        category: Category,
        lines: impl Iterator<Item = String>,
    ) -> Result<(), AtlasError> {
        fs::create_dir_all(&self.root)?;
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(self.log_path(category))?;
        for line in lines {
            // One write per record keeps line-granularity append atomicity.
            file.write_all(format!("{line}\n").as_bytes())?;
        }
        Ok(())
    }
}

/// Read a JSONL update log at `path` and reduce it to the newest record per
/// feature id. A missing file yields an empty map.
pub fn load_updates(path: impl AsRef<Path>) -> Result<LatestById, AtlasError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(LatestById::new());
    }
    let file = File::open(path)?;
    Ok(reduce_lines(BufReader::new(file)))
}

/// Latest-per-id reduction over a line stream.
///
/// Ties on `verified_at` resolve to the record encountered later in the
/// stream (`>=` comparison, forward scan). A record whose timestamp does
/// not parse ranks below every parseable one.
fn reduce_lines<R: BufRead>(reader: R) -> LatestById {
    let mut latest = LatestById::new();
    for line in reader.lines().filter_map(Result::ok) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record: UpdateRecord = match serde_json::from_str(trimmed) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping corrupt update log line");
                continue;
            }
        };
        if record.id.trim().is_empty() {
            continue;
        }
        let challenger = reduction_timestamp(&record);
        let keep = match latest.get(&record.id) {
            Some(current) => challenger >= reduction_timestamp(current),
            None => true,
        };
        if keep {
            latest.insert(record.id.clone(), record);
        }
    }
    latest
}

fn reduction_timestamp(record: &UpdateRecord) -> DateTime<Utc> {
    record.verified_at_utc().unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Shape detection: JSON-ish when the trimmed text opens with `{`/`[` or a
/// line break is immediately followed by one; CSV otherwise.
fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{')
        || trimmed.starts_with('[')
        || text.contains("\n{")
        || text.contains("\n[")
}

/// Parse a JSON array or NDJSON body into validated records.
///
/// Array bodies must parse as a whole; NDJSON bodies drop bad lines
/// individually. Non-object elements and invalid records are dropped.
fn parse_json_records(category: Category, text: &str) -> Result<Vec<UpdateRecord>, AtlasError> {
    let mut records = Vec::new();
    if text.starts_with('[') {
        let parsed: Value = serde_json::from_str(text)
            .map_err(|err| AtlasError::validation(format!("invalid JSON array: {err}")))?;
        let Value::Array(items) = parsed else {
            return Err(AtlasError::validation("JSON payload must be array or JSONL"));
        };
        for item in items {
            if let Some(record) = coerce_record(category, item) {
                records.push(record);
            }
        }
    } else {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Ok(value) = serde_json::from_str::<Value>(line) else {
                debug!("dropping unparseable bulk line");
                continue;
            };
            if let Some(record) = coerce_record(category, value) {
                records.push(record);
            }
        }
    }
    Ok(records)
}

/// Stamp `category` onto a raw JSON object and validate it as a record.
fn coerce_record(category: Category, value: Value) -> Option<UpdateRecord> {
    let Value::Object(mut map) = value else {
        return None;
    };
    map.insert(
        "category".to_string(),
        Value::String(category.as_str().to_string()),
    );
    let record: UpdateRecord = match serde_json::from_value(Value::Object(map)) {
        Ok(record) => record,
        Err(err) => {
            debug!(%err, "dropping malformed bulk record");
            return None;
        }
    };
    match record.validated() {
        Ok(record) => Some(record),
        Err(err) => {
            debug!(%err, "dropping invalid bulk record");
            None
        }
    }
}

/// Parse a CSV body (header row required) into validated records.
///
/// Headers are matched case-insensitively; `id,status,verified_at` must all
/// be present. A `tags` cell splits on `|` into a set, empties dropped.
fn parse_csv_records(category: Category, text: &str) -> Result<Vec<UpdateRecord>, AtlasError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|err| AtlasError::validation(format!("invalid CSV: {err}")))?
        .clone();
    let mut columns: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        columns
            .entry(header.trim().to_ascii_lowercase())
            .or_insert(idx);
    }
    if REQUIRED_CSV_HEADERS
        .iter()
        .any(|required| !columns.contains_key(*required))
    {
        return Err(AtlasError::validation(
            "CSV must include headers: id,status,verified_at",
        ));
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let Ok(row) = row else {
            debug!("dropping unparseable CSV row");
            continue;
        };
        let cell = |name: &str| {
            columns
                .get(name)
                .and_then(|&idx| row.get(idx))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let (Some(id), Some(status), Some(verified_at)) =
            (cell("id"), cell("status"), cell("verified_at"))
        else {
            continue;
        };
        let mut record = UpdateRecord::new(category, id, status, verified_at);
        record.name = cell("name");
        record.notes = cell("notes");
        record.priority = cell("priority").map(Value::String);
        record.source = cell("source");
        record.reporter = cell("reporter");
        record.tags = cell("tags")
            .map(|raw| {
                raw.split(TAGS_DELIMITER)
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect::<BTreeSet<_>>()
            })
            .filter(|tags| !tags.is_empty());
        match record.validated() {
            Ok(record) => records.push(record),
            Err(err) => debug!(%err, "dropping invalid CSV record"),
        }
    }
    Ok(records)
}
