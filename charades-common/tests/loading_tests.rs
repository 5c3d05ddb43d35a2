//! Tests for loading the catalog and the TOML config from disk
//!
//! Tests cover:
//! - Catalog directory with all three collection files
//! - Missing or malformed collection files fail the load
//! - Explicit config file must exist; malformed config is rejected

use charades_common::catalog::{DIALOGUES_FILE, MOVIES_FILE, SONGS_FILE};
use charades_common::config::{load_optional_toml_config, load_toml_config, Overrides, ServiceConfig};
use charades_common::{Catalog, Category, Error};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_catalog(dir: &TempDir, movies: &str, songs: &str, dialogues: &str) {
    fs::write(dir.path().join(MOVIES_FILE), movies).unwrap();
    fs::write(dir.path().join(SONGS_FILE), songs).unwrap();
    fs::write(dir.path().join(DIALOGUES_FILE), dialogues).unwrap();
}

#[test]
fn test_load_catalog_from_directory() {
    let dir = TempDir::new().unwrap();
    write_catalog(
        &dir,
        r#"{"movies": [{"id": 7, "title": "Lagaan", "year": 2001, "industry": "bollywood", "decade": "2000s", "actors": ["Aamir Khan"]}]}"#,
        r#"{"songs": [{"id": 7, "title": "Happy", "year": 2013, "industry": "international", "artist": "Pharrell Williams"}]}"#,
        r#"{"dialogues": [{"id": 1, "dialogue": "All is well.", "movie": "3 Idiots", "year": 2009, "industry": "bollywood", "title_complexity": "simple"}]}"#,
    );

    let catalog = Catalog::load_from_dir(dir.path()).unwrap();
    let counts = catalog.counts();
    assert_eq!((counts.movie, counts.song, counts.dialogue), (1, 1, 1));
    assert_eq!(catalog.by_id(Category::Song, 7).unwrap().display_text, "Happy");
    assert_eq!(catalog.by_id(Category::Dialogue, 1).unwrap().display_text, "All is well.");
}

#[test]
fn test_missing_collection_file_fails_load() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(MOVIES_FILE), r#"{"movies": []}"#).unwrap();

    let err = Catalog::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, Error::CatalogLoad(_)), "unexpected error: {err}");
}

#[test]
fn test_malformed_collection_file_fails_load() {
    let dir = TempDir::new().unwrap();
    write_catalog(&dir, r#"{"movies": ["#, r#"{"songs": []}"#, r#"{"dialogues": []}"#);

    assert!(matches!(Catalog::load_from_dir(dir.path()), Err(Error::CatalogLoad(_))));
}

#[test]
fn test_load_toml_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[server]
host = "0.0.0.0"
port = 6000

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let file = load_optional_toml_config(Some(&path)).unwrap();
    let config = ServiceConfig::resolve(Overrides::default(), file);
    assert_eq!(config.bind_address(), "0.0.0.0:6000");
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.data_dir, None);
}

#[test]
fn test_explicit_config_must_exist() {
    let missing = PathBuf::from("/nonexistent/charades/config.toml");
    assert!(matches!(load_optional_toml_config(Some(&missing)), Err(Error::Config(_))));
}

#[test]
fn test_malformed_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();

    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}
