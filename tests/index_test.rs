//! Integration tests for index snapshots built from settings and mappings.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use querydsl::error::{ErrorKind, Result};
use querydsl::index::{AnalyzeRequest, Index, IndexSnapshot};
use querydsl::mapping::{FieldType, Mappings};
use querydsl::query::Query;
use querydsl::settings::IndexSettings;
use serde_json::{Value, json};
use tempfile::NamedTempFile;

fn settings() -> Result<IndexSettings> {
    IndexSettings::from_value(json!({
        "settings": {
            "number_of_shards": 1,
            "analysis": {
                "analyzer": {
                    "folded": {"tokenizer": "standard", "filter": ["lowercase", "ascii_folding"]},
                    "tags": {"tokenizer": "comma", "filter": ["trim", "lowercase"]}
                },
                "tokenizer": {
                    "comma": {"type": "char_group", "tokenize_on_chars": [","]}
                }
            }
        }
    }))
}

fn mappings() -> Result<Mappings> {
    Mappings::from_value(json!({
        "mappings": {
            "properties": {
                "title": {"type": "text", "analyzer": "folded"},
                "labels": {"type": "text", "analyzer": "tags"},
                "status": {"type": "keyword"},
                "year": {"type": "integer"},
                "published": {"type": "date", "format": "yyyy-MM-dd"}
            }
        }
    }))
}

fn json_file(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{value}").unwrap();
    file
}

#[test]
fn test_settings_and_mappings_from_files() -> Result<()> {
    let settings_file = json_file(&json!({"analysis": {"analyzer": {"plain": {"type": "whitespace"}}}}));
    let mappings_file = json_file(&json!({"properties": {
        "title": {"type": "text", "analyzer": "plain"},
        "year": {"type": "long"}
    }}));

    let settings = IndexSettings::from_path(settings_file.path())?;
    let mappings = Mappings::from_path(mappings_file.path())?;
    assert_eq!(mappings.field_type("year"), Some(FieldType::Numeric));

    let snapshot = IndexSnapshot::new("files", settings, mappings)?;
    assert_eq!(snapshot.analyzers().names(), vec!["plain"]);
    Ok(())
}

#[test]
fn test_unreadable_files() -> Result<()> {
    let mut broken = NamedTempFile::new().unwrap();
    write!(broken, "{{").unwrap();
    assert!(IndexSettings::from_path(broken.path()).is_err());
    assert!(Mappings::from_path("/nonexistent/mappings.json").is_err());
    Ok(())
}

#[test]
fn test_translate_with_custom_analyzers() -> Result<()> {
    let snapshot = IndexSnapshot::new("books", settings()?, mappings()?)?;
    assert_eq!(snapshot.settings().number_of_shards, Some(1));

    let query = snapshot.translate(Some(&json!({"match_bool_prefix": {"title": "Crème Brûl"}})))?;
    assert_eq!(query.description(), "(title:creme title:brul*)");

    let query = snapshot.translate(Some(&json!({"match_phrase_prefix": {"labels": "Rust, Sys"}})))?;
    assert_eq!(query.description(), "(+labels:sys* +labels:\"rust\")");

    let query = snapshot.translate(Some(&json!({"term": {"year": 2024}})))?;
    assert_eq!(query.description(), "year:[2024 TO 2024]");

    let query = snapshot.translate(Some(&json!({"range": {"published": {"gte": "2024-01-01"}}})))?;
    let Query::DateRange(range) = query else {
        panic!("expected a date range");
    };
    assert!(range.min_inclusive());
    Ok(())
}

#[test]
fn test_analyze_against_snapshot() -> Result<()> {
    let snapshot = IndexSnapshot::new("books", settings()?, mappings()?)?;

    let tokens = snapshot.analyze(&AnalyzeRequest::new(" Rust ,Systems").with_field("labels"))?;
    let texts: Vec<&str> = tokens.iter().map(|t| t.token.as_str()).collect();
    assert_eq!(texts, vec!["rust", "systems"]);

    let request: AnalyzeRequest = serde_json::from_value(json!({
        "text": "a,b",
        "tokenizer": "comma",
        "filter": ["uppercase"]
    }))
    .unwrap();
    let tokens = snapshot.analyze(&request)?;
    let texts: Vec<&str> = tokens.iter().map(|t| t.token.as_str()).collect();
    assert_eq!(texts, vec!["A", "B"]);
    Ok(())
}

#[test]
fn test_snapshot_rejects_unknown_components() -> Result<()> {
    let settings = IndexSettings::from_value(json!({"analysis": {"analyzer": {
        "broken": {"tokenizer": "standard", "filter": ["nope"]}
    }}}))?;
    let err = IndexSnapshot::new("broken", settings, Mappings::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParsingException);
    assert_eq!(err.reason(), "[analyzer] [broken] used undefined token_filter [nope]");
    Ok(())
}

#[test]
fn test_readers_keep_their_snapshot() -> Result<()> {
    let index = Arc::new(Index::new("books", IndexSettings::default(), Mappings::new())?);
    let before = index.snapshot();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || {
                let snapshot = index.snapshot();
                snapshot.translate(Some(&json!({"term": {"year": 2024}}))).is_ok()
            })
        })
        .collect();

    index.update(settings()?, mappings()?)?;
    for reader in readers {
        assert!(reader.join().unwrap());
    }

    // The old snapshot still sees `year` as unmapped text.
    let old = before.translate(Some(&json!({"term": {"year": "2024"}})))?;
    assert_eq!(old.description(), "year:2024");

    let new = index.snapshot().translate(Some(&json!({"term": {"year": "2024"}})))?;
    assert_eq!(new.description(), "year:[2024 TO 2024]");
    Ok(())
}
