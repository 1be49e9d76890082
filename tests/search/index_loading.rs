//! Loading content indexes and configs from disk.

use pagesift::{ContentIndex, IndexError, PagesiftError, SearchConfig};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

// ============================================================================
// INDEX FILES
// ============================================================================

#[test]
fn loads_records_in_file_order() {
    let file = write_temp(
        r#"[
            {"title": "Sentry", "body": "Error tracking", "section": "tools"},
            {"title": "Datadog", "content": "Observability", "section": "tools"}
        ]"#,
    );
    let index = ContentIndex::from_path(file.path()).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.get(0).unwrap().title, "Sentry");
    // `content` is accepted in place of `body`
    assert_eq!(index.get(1).unwrap().body, "Observability");
}

#[test]
fn duplicate_record_is_rejected_with_positions() {
    let file = write_temp(
        r#"[
            {"title": "Sentry", "body": "a", "section": "tools"},
            {"title": "Other", "body": "b", "section": "tools"},
            {"title": "Sentry", "body": "c", "section": "tools"}
        ]"#,
    );
    match ContentIndex::from_path(file.path()) {
        Err(PagesiftError::InvalidIndex(IndexError::DuplicateRecord {
            position, first, ..
        })) => {
            assert_eq!(position, 2);
            assert_eq!(first, 0);
        }
        other => panic!("expected duplicate record error, got {:?}", other.map(|i| i.len())),
    }
}

#[test]
fn same_title_in_different_sections_is_allowed() {
    let index = ContentIndex::from_json(
        r#"[
            {"title": "Overview", "body": "", "section": "tools"},
            {"title": "Overview", "body": "", "section": "future"}
        ]"#,
    )
    .unwrap();
    assert_eq!(index.sections().len(), 2);
}

#[test]
fn blank_title_is_rejected() {
    let err = ContentIndex::from_json(r#"[{"title": "  ", "body": "x", "section": "s"}]"#)
        .map(|i| i.len())
        .unwrap_err();
    assert!(matches!(
        err,
        PagesiftError::InvalidIndex(IndexError::EmptyTitle { position: 0 })
    ));
}

#[test]
fn missing_section_key_is_a_parse_error() {
    let err = ContentIndex::from_json(r#"[{"title": "x", "body": "y"}]"#)
        .map(|i| i.len())
        .unwrap_err();
    assert!(matches!(err, PagesiftError::IndexParse { .. }));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = ContentIndex::from_path(&path).map(|i| i.len()).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}

// ============================================================================
// CONFIG FILES
// ============================================================================

#[test]
fn partial_config_keeps_other_defaults() {
    let file = write_temp(r#"{"minQueryLen": 3, "noResultsText": "Nothing here"}"#);
    let config = SearchConfig::from_path(file.path()).unwrap();
    assert_eq!(config.min_query_len, 3);
    assert_eq!(config.no_results_text, "Nothing here");
    assert_eq!(config.placeholder, SearchConfig::default().placeholder);
}

#[test]
fn zero_threshold_is_rejected() {
    let file = write_temp(r#"{"minQueryLen": 0}"#);
    assert!(matches!(
        SearchConfig::from_path(file.path()),
        Err(PagesiftError::InvalidConfig(_))
    ));
}
