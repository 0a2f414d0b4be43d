use aidmap::{AtlasError, Category, UpdateStore};

#[test]
fn csv_with_minimal_headers_appends_one_record() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let appended = store
        .bulk_append(
            Category::Checkpoints,
            "id,status,verified_at\nA1,open,2025-01-01T00:00:00Z",
        )
        .unwrap();
    assert_eq!(appended, 1);

    let latest = store.read_latest(Category::Checkpoints).unwrap();
    assert_eq!(latest.len(), 1);
    let record = &latest["A1"];
    assert_eq!(record.category, Category::Checkpoints);
    assert_eq!(record.status, "open");
    assert_eq!(record.tags, None);
}

#[test]
fn csv_optional_columns_map_onto_record_fields() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let body = "id,status,verified_at,source,reporter,notes,tags\n\
                B2,closed,2025-03-01T00:00:00Z,NGO-X,field-team,shelling nearby,convoy|urgent||convoy";
    assert_eq!(store.bulk_append(Category::Borders, body).unwrap(), 1);

    let latest = store.read_latest(Category::Borders).unwrap();
    let record = &latest["B2"];
    assert_eq!(record.source.as_deref(), Some("NGO-X"));
    assert_eq!(record.reporter.as_deref(), Some("field-team"));
    assert_eq!(record.notes.as_deref(), Some("shelling nearby"));
    let tags = record.tags.as_ref().unwrap();
    assert_eq!(tags.len(), 2);
    assert!(tags.contains("convoy"));
    assert!(tags.contains("urgent"));
}

#[test]
fn csv_headers_match_case_insensitively() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let body = "ID,Status,VERIFIED_AT\nC3,open,2025-01-01T00:00:00Z";
    assert_eq!(store.bulk_append(Category::Water, body).unwrap(), 1);
    assert!(store
        .read_latest(Category::Water)
        .unwrap()
        .contains_key("C3"));
}

#[test]
fn csv_missing_required_header_is_rejected_without_a_write() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let err = store
        .bulk_append(Category::Borders, "id,status\nA1,open")
        .unwrap_err();
    assert!(matches!(err, AtlasError::Validation { .. }));
    assert!(!store.log_path(Category::Borders).exists());
}

#[test]
fn csv_rows_missing_required_values_are_dropped_not_counted() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let body = "id,status,verified_at\n\
                A1,open,2025-01-01T00:00:00Z\n\
                ,closed,2025-01-02T00:00:00Z\n\
                A3,,2025-01-03T00:00:00Z\n\
                A4,open,not-a-timestamp\n\
                A5,closed,2025-01-05T00:00:00Z";
    assert_eq!(store.bulk_append(Category::Borders, body).unwrap(), 2);
    assert_eq!(store.read_latest(Category::Borders).unwrap().len(), 2);
}

#[test]
fn json_array_bodies_are_detected_and_ingested() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let body = r#"[
        {"id": "border:a", "status": "open", "verified_at": "2025-01-01T00:00:00Z"},
        {"id": "border:b", "status": "closed", "verified_at": "bad-time"},
        "not an object",
        {"id": "border:c", "status": "open", "verified_at": "2025-01-03T00:00:00Z"}
    ]"#;
    assert_eq!(store.bulk_append(Category::Borders, body).unwrap(), 2);

    let latest = store.read_latest(Category::Borders).unwrap();
    assert!(latest.contains_key("border:a"));
    assert!(latest.contains_key("border:c"));
    assert!(!latest.contains_key("border:b"));
}

#[test]
fn ndjson_bodies_drop_bad_lines_individually() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let body = concat!(
        r#"{"id": "cp:a", "status": "open", "verified_at": "2025-01-01T00:00:00Z"}"#,
        "\n",
        "{broken json\n",
        r#"{"id": "cp:b", "status": "closed", "verified_at": "2025-01-02T00:00:00Z"}"#,
    );
    assert_eq!(store.bulk_append(Category::Checkpoints, body).unwrap(), 2);
    assert_eq!(store.read_latest(Category::Checkpoints).unwrap().len(), 2);
}

#[test]
fn bulk_ingestion_stamps_the_target_category() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    // Payload claims another category; the query-selected one wins.
    let body = r#"{"id": "x", "category": "health", "status": "open", "verified_at": "2025-01-01T00:00:00Z"}"#;
    assert_eq!(store.bulk_append(Category::Shelters, body).unwrap(), 1);

    let latest = store.read_latest(Category::Shelters).unwrap();
    assert_eq!(latest["x"].category, Category::Shelters);
    assert!(store.read_latest(Category::Health).unwrap().is_empty());
}

#[test]
fn malformed_json_array_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let err = store
        .bulk_append(Category::Borders, "[{\"id\": \"a\",")
        .unwrap_err();
    assert!(matches!(err, AtlasError::Validation { .. }));
    assert!(!store.log_path(Category::Borders).exists());
}

#[test]
fn empty_bodies_are_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let err = store.bulk_append(Category::Borders, "   \n  ").unwrap_err();
    assert!(matches!(err, AtlasError::Validation { .. }));
}

#[test]
fn bulk_timestamps_are_normalized_like_single_appends() {
    let temp = tempfile::tempdir().unwrap();
    let store = UpdateStore::new(temp.path());

    let body = "id,status,verified_at\nA1,open,2025-08-19T16:45:00+03:00";
    assert_eq!(store.bulk_append(Category::Borders, body).unwrap(), 1);
    assert_eq!(
        store.read_latest(Category::Borders).unwrap()["A1"].verified_at,
        "2025-08-19T13:45:00Z"
    );
}
