// tests/ledger_roundtrip.rs
//! Persistence contract of the seen-ledger: what was written is what loads,
//! and a bad file refuses to load instead of running with unknown state.

use comic_courier::{ComicId, SeenLedger};

#[test]
fn round_trip_preserves_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_urls.json");
    std::fs::write(
        &path,
        r#"{"smbc": "https://smbc.test/1.png", "xkcd": "https://xkcd.test/2.png"}"#,
    )
    .unwrap();

    let mut ledger = SeenLedger::load(&path).unwrap();
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.get(ComicId::Smbc), Some("https://smbc.test/1.png"));
    assert_eq!(ledger.get(ComicId::Xkcd), Some("https://xkcd.test/2.png"));
    assert!(ledger.get(ComicId::Oglaf).is_none());

    ledger
        .set(ComicId::Oglaf, "https://media.oglaf.com/3.jpg")
        .unwrap();

    let reloaded = SeenLedger::load(&path).unwrap();
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded.get(ComicId::Smbc), Some("https://smbc.test/1.png"));
    assert_eq!(
        reloaded.get(ComicId::Oglaf),
        Some("https://media.oglaf.com/3.jpg")
    );
}

#[test]
fn missing_file_refuses_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = SeenLedger::load(dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("reading seen ledger"));
}

#[test]
fn unparseable_file_refuses_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_urls.json");
    std::fs::write(&path, "not json at all").unwrap();
    let err = SeenLedger::load(&path).unwrap_err();
    assert!(err.to_string().contains("parsing seen ledger"));
}

#[test]
fn entries_for_retired_sources_survive_rewrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_urls.json");
    std::fs::write(&path, r#"{"dilbert": "https://dilbert.test/last.gif"}"#).unwrap();

    let mut ledger = SeenLedger::load(&path).unwrap();
    ledger.set(ComicId::Xkcd, "https://xkcd.test/1.png").unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("dilbert"));
    assert!(raw.contains("https://dilbert.test/last.gif"));
    assert!(raw.contains("xkcd"));
}

#[test]
fn empty_object_is_a_valid_fresh_start() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("last_urls.json");
    std::fs::write(&path, "{}").unwrap();
    let ledger = SeenLedger::load(&path).unwrap();
    assert!(ledger.is_empty());
}
