//! End-to-end passes over a temporary tree with an in-memory remote store.

use docmirror_core::{slug_for, Document, Registry};
use docmirror_protocol::DocumentPayload;
use docmirror_sync_engine::{MockCall, MockTransport, RemoteStore, SyncConfig, SyncEngine};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn engine_for(dir: &Path) -> SyncEngine<MockTransport> {
    SyncEngine::new(SyncConfig::new(dir), MockTransport::new())
}

fn snapshot(dir: &Path) -> serde_json::Value {
    let data = fs::read(dir.join("book.json")).unwrap();
    serde_json::from_slice(&data).unwrap()
}

#[test]
fn empty_directory_writes_empty_snapshot() {
    let dir = TempDir::new().unwrap();
    let engine = engine_for(dir.path());
    let mut registry = engine.load_registry();

    let report = engine.run(&mut registry).unwrap();

    assert!(registry.is_empty());
    assert_eq!(report.build.scanned, 0);
    assert_eq!(snapshot(dir.path()), serde_json::json!([]));
}

#[test]
fn heading_becomes_title() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.md"), "# Hello World\nbody text\n").unwrap();
    let engine = engine_for(dir.path());
    let mut registry = engine.load_registry();

    let report = engine.run(&mut registry).unwrap();
    assert_eq!(report.created, 1);
    assert!(report.is_clean());

    let record = registry.find_by_slug(&slug_for("notes.md")).unwrap();
    assert_eq!(record.title, "HelloWorld");
    assert!(record.remote_id > 0);
    assert_eq!(registry.find_by_id(record.remote_id).unwrap().slug, record.slug);

    let sent = engine.transport().document(record.remote_id).unwrap();
    assert_eq!(sent.title, "HelloWorld");
    assert_eq!(sent.slug, record.slug);
    assert_eq!(sent.body, "# Hello World\nbody text\n");

    let saved = snapshot(dir.path());
    assert_eq!(saved[0]["title"], "HelloWorld");
    assert_eq!(saved[0]["raw"]["id"], record.remote_id);
}

#[test]
fn ignored_name_is_never_scanned() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".ignoresync"), "secret.md\n").unwrap();
    fs::create_dir_all(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("secret.md"), "# Secret").unwrap();
    fs::write(dir.path().join("sub/secret.md"), "# Secret").unwrap();
    fs::write(dir.path().join("public.md"), "# Public").unwrap();
    let engine = engine_for(dir.path());
    let mut registry = engine.load_registry();

    engine.run(&mut registry).unwrap();

    assert_eq!(registry.len(), 1);
    assert!(registry.find_by_slug(&slug_for("secret.md")).is_none());
    assert!(registry.find_by_slug(&slug_for("sub/secret.md")).is_none());
    assert_eq!(engine.transport().calls().len(), 1);
}

#[test]
fn deleted_file_is_dropped_from_snapshot() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("keep.md"), "# Keep").unwrap();
    fs::write(dir.path().join("gone.md"), "# Gone").unwrap();

    let engine = engine_for(dir.path());
    let mut registry = engine.load_registry();
    engine.run(&mut registry).unwrap();
    let gone_id = registry.find_by_slug(&slug_for("gone.md")).unwrap().remote_id;
    assert_ne!(gone_id, 0);

    fs::remove_file(dir.path().join("gone.md")).unwrap();
    let mut registry = engine.load_registry();
    let report = engine.run(&mut registry).unwrap();

    assert_eq!(report.dropped, 1);
    assert_eq!(report.updated, 1);
    let saved = snapshot(dir.path());
    let slugs: Vec<&str> = saved
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec![slug_for("keep.md").as_str()]);
}

#[test]
fn failed_create_is_retried_next_run() {
    let dir = TempDir::new().unwrap();
    for name in ["a.md", "b.md", "c.md"] {
        fs::write(dir.path().join(name), format!("# {name}")).unwrap();
    }
    let engine = engine_for(dir.path());
    engine.transport().fail_slug(slug_for("b.md"));

    let mut registry = engine.load_registry();
    let report = engine.run(&mut registry).unwrap();
    assert_eq!(report.created, 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.failures[0].slug, slug_for("b.md"));

    let persisted = Registry::load(dir.path().join("book.json"));
    assert_eq!(persisted.len(), 3);
    assert_eq!(persisted.find_by_slug(&slug_for("b.md")).unwrap().remote_id, 0);
    assert_ne!(persisted.find_by_slug(&slug_for("a.md")).unwrap().remote_id, 0);
    assert_ne!(persisted.find_by_slug(&slug_for("c.md")).unwrap().remote_id, 0);

    engine.transport().clear_failures();
    let mut registry = engine.load_registry();
    let report = engine.run(&mut registry).unwrap();
    assert_eq!(report.created, 1);
    assert_eq!(report.updated, 2);
    assert!(report.is_clean());
    assert_ne!(registry.find_by_slug(&slug_for("b.md")).unwrap().remote_id, 0);
    assert_eq!(engine.transport().document_count(), 3);
}

#[test]
fn snapshot_round_trips_between_runs() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("guide")).unwrap();
    fs::write(dir.path().join("guide/start.md"), "# Start").unwrap();
    let engine = engine_for(dir.path());

    let mut registry = engine.load_registry();
    engine.run(&mut registry).unwrap();
    let reloaded = engine.load_registry();

    let before: Vec<_> = registry.iter().cloned().collect();
    let after: Vec<_> = reloaded.iter().cloned().collect();
    assert_eq!(before, after);

    let record = &after[0];
    assert_eq!(record.dir, "guide");
    assert_eq!(record.name, "start.md");
    assert_eq!(record.path, "guide/start.md");
}

#[test]
fn repeated_runs_never_duplicate_documents() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.md"), "# A").unwrap();
    fs::write(dir.path().join("b.md"), "# B").unwrap();
    let engine = engine_for(dir.path());

    for _ in 0..3 {
        let mut registry = engine.load_registry();
        engine.run(&mut registry).unwrap();
        assert_eq!(registry.len(), 2);
    }
    assert_eq!(engine.transport().document_count(), 2);
}

#[test]
fn shared_remote_id_in_snapshot_never_overwrites_the_owner() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.md"), "# A\n").unwrap();
    fs::write(dir.path().join("b.md"), "# B\n").unwrap();
    let engine = engine_for(dir.path());

    let seeded = engine
        .transport()
        .create("tests/sync", &DocumentPayload::markdown("A", slug_for("a.md"), "# A\n"))
        .unwrap();
    let mut a = Document::new(slug_for("a.md"), "a.md");
    a.remote_id = seeded.id;
    let mut b = Document::new(slug_for("b.md"), "b.md");
    b.remote_id = seeded.id;
    fs::write(
        dir.path().join("book.json"),
        serde_json::to_vec(&vec![a, b]).unwrap(),
    )
    .unwrap();

    for _ in 0..2 {
        let mut registry = engine.load_registry();
        let report = engine.run(&mut registry).unwrap();
        assert!(report.is_clean());
    }

    let overwrites = engine
        .transport()
        .calls()
        .iter()
        .filter(|call| {
            matches!(call, MockCall::Update { id, slug, .. }
                if *id == seeded.id && *slug == slug_for("b.md"))
        })
        .count();
    assert_eq!(overwrites, 0);
    assert_eq!(engine.transport().document(seeded.id).unwrap().title, "A");

    let registry = engine.load_registry();
    let b = registry.find_by_slug(&slug_for("b.md")).unwrap();
    assert_ne!(b.remote_id, seeded.id);
    assert_eq!(registry.find_by_id(seeded.id).unwrap().slug, slug_for("a.md"));
    assert_eq!(engine.transport().document_count(), 2);
}
