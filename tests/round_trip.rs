use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

use tasklist::io::persistence::{load, save};
use tasklist::io::store::{FileStore, KeyValueStore};
use tasklist::model::item::{Item, ValidationMode};
use tempfile::TempDir;

/// Helper: copy a fixture into a fresh store directory under the `todos` key
fn store_with_fixture(tmp: &TempDir, fixture_name: &str) -> FileStore {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(fixture_name);
    let source = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Could not read fixture {}: {}", fixture_name, e));
    let mut store = FileStore::new(tmp.path());
    store.set("todos", &source).unwrap();
    store
}

fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

// ============================================================================
// Well-formed data
// ============================================================================

#[test]
fn browser_export_round_trips() {
    let tmp = TempDir::new().unwrap();
    let mut store = store_with_fixture(&tmp, "browser_todos.json");

    let first = load(&store, "todos", ValidationMode::Strict);
    assert_eq!(first.len(), 3);
    assert_eq!(first[1].text, "Call the plumber");
    assert!(first[1].completed);
    assert_eq!(first[2].order, 1_717_999_999_000.0);

    save(&mut store, "todos", &first).unwrap();
    let second = load(&store, "todos", ValidationMode::Strict);
    assert_eq!(second, first);
}

#[test]
fn empty_collection_round_trips_through_files() {
    let tmp = TempDir::new().unwrap();
    let mut store = FileStore::new(tmp.path().join("fresh"));
    assert!(load(&store, "todos", ValidationMode::Lenient).is_empty());
    save(&mut store, "todos", &Vec::<Item>::new()).unwrap();
    assert_eq!(
        fs::read_to_string(tmp.path().join("fresh/todos.json")).unwrap(),
        "[]"
    );
    assert!(load(&store, "todos", ValidationMode::Lenient).is_empty());
}

#[test]
fn awkward_text_survives() {
    let tmp = TempDir::new().unwrap();
    let mut store = FileStore::new(tmp.path());
    let items = vec![
        Item::create("q".into(), "quote \" and \\ backslash".into(), 1.0),
        Item::create("u".into(), "ünïcödé ✓ 日本".into(), 2.0),
        Item::create("n".into(), "line\nbreak".into(), 2.5),
    ];
    save(&mut store, "todos", &items).unwrap();
    assert_eq!(load(&store, "todos", ValidationMode::Strict), items);
}

// ============================================================================
// Loose and corrupt data
// ============================================================================

#[test]
fn loose_records_lenient() {
    let tmp = TempDir::new().unwrap();
    let store = store_with_fixture(&tmp, "loose_todos.json");
    let items = load(&store, "todos", ValidationMode::Lenient);

    assert_eq!(items.len(), 3);
    assert_eq!(&ids(&items)[..2], &["k1", "42"]);
    assert_eq!(items[0].text, "typed fine");
    assert!(items[1].completed);
    assert_eq!(items[1].order, 7.0);
    assert_eq!(items[2].text, "no id");
    assert!(!items[2].completed);
    assert!(!items[2].id.is_empty());
}

#[test]
fn loose_records_strict() {
    let tmp = TempDir::new().unwrap();
    let store = store_with_fixture(&tmp, "loose_todos.json");
    let items = load(&store, "todos", ValidationMode::Strict);
    assert_eq!(ids(&items), vec!["k1"]);
}

#[test]
fn non_array_blob_loads_empty() {
    let tmp = TempDir::new().unwrap();
    let store = store_with_fixture(&tmp, "object_blob.json");
    assert!(load(&store, "todos", ValidationMode::Lenient).is_empty());
}

#[test]
fn truncated_blob_loads_empty() {
    let tmp = TempDir::new().unwrap();
    let store = store_with_fixture(&tmp, "truncated_blob.json");
    assert!(load(&store, "todos", ValidationMode::Lenient).is_empty());
}
