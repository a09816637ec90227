//! End-to-end tests: export file on disk -> training records -> table.

use std::path::PathBuf;

use labelstudio_ner::{
    load, read_training_data, save_training_data, to_table, AnnotationLoader, ConvertError,
    Entity, LoaderConfig, Table,
};
use tempfile::TempDir;

const EXPORT: &str = r#"[
  {
    "id": 1,
    "text": "John lives in NYC",
    "label": [
      {"start": 0, "end": 4, "text": "John", "labels": ["PER"]},
      {"start": 14, "end": 17, "text": "NYC", "labels": ["LOC"]}
    ]
  },
  {
    "id": 2,
    "text": "The New York Times reported it",
    "label": [
      {"start": 4, "end": 18, "labels": ["ORG"]},
      {"start": 4, "end": 12, "labels": ["LOC"]},
      {"start": 19, "end": 27, "labels": []}
    ]
  },
  {"id": 3, "text": "Nothing to see here"}
]"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write_export(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn triples(entities: &[Entity]) -> Vec<(i64, i64, &str)> {
    entities
        .iter()
        .map(|e| (e.start, e.end, e.label.as_str()))
        .collect()
}

#[test]
fn test_load_export_file() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write_export(&dir, "export.json", EXPORT);

    let records = load(&path).unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].text.as_deref(), Some("John lives in NYC"));
    assert_eq!(
        triples(records[0].entities()),
        vec![(0, 4, "PER"), (14, 17, "LOC")]
    );

    // Both spans start at 4, so each contains the other's start; the third has no label.
    assert!(records[1].entities().is_empty());

    assert_eq!(records[2].text.as_deref(), Some("Nothing to see here"));
    assert!(records[2].entities().is_empty());
}

#[test]
fn test_load_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_export(&dir, "export.json", EXPORT);

    let first = load(&path).unwrap();
    let second = load(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_missing_file_is_file_access_error() {
    let dir = TempDir::new().unwrap();
    let err = load(dir.path().join("absent.json")).unwrap_err();
    match err {
        ConvertError::FileAccess { path, source } => {
            assert!(path.ends_with("absent.json"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected FileAccess, got {other:?}"),
    }
}

#[test]
fn test_unreadable_path_is_file_access_error() {
    // Opening a directory succeeds on Unix; the failure comes from the first read.
    let dir = TempDir::new().unwrap();

    let err = load(dir.path()).unwrap_err();
    assert!(
        matches!(err, ConvertError::FileAccess { .. }),
        "expected FileAccess, got {err:?}"
    );

    let err = read_training_data(dir.path()).unwrap_err();
    assert!(
        matches!(err, ConvertError::FileAccess { .. }),
        "expected FileAccess, got {err:?}"
    );
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_export(&dir, "broken.json", "[{\"text\": \"unterminated");
    assert!(matches!(load(&path), Err(ConvertError::Parse(_))));
}

#[test]
fn test_table_row_count_matches_records() {
    let dir = TempDir::new().unwrap();
    let path = write_export(&dir, "export.json", EXPORT);

    let records = load(&path).unwrap();
    let table = to_table(&records);
    assert_eq!(table.text().len(), records.len());
    assert_eq!(table.label().len(), records.len());
    assert_eq!(table.label()[0].entities, records[0].annotations.entities);
}

#[test]
fn test_config_file_selects_labels() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, "export.json", EXPORT);
    let config_path = write_export(&dir, "loader.toml", "labels = [\"LOC\"]\n");

    let config = LoaderConfig::load_from_path(&config_path).unwrap();
    let (records, stats) = AnnotationLoader::new(config)
        .load_with_stats(&export)
        .unwrap();

    assert_eq!(triples(records[0].entities()), vec![(14, 17, "LOC")]);
    assert_eq!(stats.documents, 3);
    assert_eq!(stats.spans, 5);
    assert_eq!(stats.entities, 1);
    assert_eq!(stats.filtered, 1);
    assert_eq!(stats.overlapping, 2);
    assert_eq!(stats.unlabeled, 1);
}

#[test]
fn test_load_many_concatenates_in_order() {
    let dir = TempDir::new().unwrap();
    let a = write_export(
        &dir,
        "a.json",
        r#"[{"text":"Alpha","label":[{"start":0,"end":5,"labels":["ORG"]}]}]"#,
    );
    let b = write_export(&dir, "b.json", r#"[{"text":"Beta"},{"text":"Gamma"}]"#);

    let (records, stats) = AnnotationLoader::default().load_many(&[&a, &b]).unwrap();
    let texts: Vec<_> = records.iter().map(|r| r.text.as_deref()).collect();
    assert_eq!(texts, vec![Some("Alpha"), Some("Beta"), Some("Gamma")]);
    assert_eq!(stats.documents, 3);
    assert_eq!(stats.entities, 1);

    let broken = write_export(&dir, "c.json", "nope");
    assert!(AnnotationLoader::default()
        .load_many(&[&a, &broken])
        .is_err());
}

#[test]
fn test_saved_training_data_reads_back() {
    let dir = TempDir::new().unwrap();
    let export = write_export(&dir, "export.json", EXPORT);
    let out = dir.path().join("train.json");

    let records = load(&export).unwrap();
    save_training_data(&records, &out).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        raw[0],
        serde_json::json!(["John lives in NYC", {"entities": [[0, 4, "PER"], [14, 17, "LOC"]]}])
    );

    assert_eq!(read_training_data(&out).unwrap(), records);

    let table = Table::from_value(&raw).unwrap();
    assert_eq!(table.len(), 3);
}
