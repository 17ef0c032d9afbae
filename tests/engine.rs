//! End-to-end tests for sessions and the bundled stores.
mod common;
use common::*;
use parley::prelude::*;
use tokio_test::block_on;

#[test]
fn test_new_engine_serves_starter_flow() {
    let engine = FlowEngine::builder(MemoryStore::new()).build();
    let live = engine.live().expect("starter flow should be live");
    assert!(live.contains("root"));
    assert_eq!(engine.editor().selected(), "root");
}

#[test]
fn test_load_replaces_working_copy() {
    let store = MemoryStore::with_flow(WireFlow::from_json(WIRE_FLOW_JSON).unwrap());
    let mut engine = FlowEngine::builder(store).build();

    assert_eq!(block_on(engine.load()), LoadOutcome::Remote);
    assert_eq!(engine.editor().graph().len(), 2);
    assert!(engine.editor().graph().contains("faq"));
    assert!(engine.published().unwrap().contains("faq"));
}

#[test]
fn test_load_with_nothing_stored_falls_back() {
    let mut engine = FlowEngine::builder(MemoryStore::new())
        .with_graph(create_rich_flow())
        .build();

    assert_eq!(block_on(engine.load()), LoadOutcome::Fallback);
    assert_eq!(engine.editor().graph(), &create_rich_flow());
}

#[test]
fn test_load_failure_is_not_fatal() {
    let mut engine = FlowEngine::builder(FailingStore)
        .with_graph(create_scenario_flow())
        .build();

    assert_eq!(block_on(engine.load()), LoadOutcome::Fallback);
    assert_eq!(engine.editor().graph(), &create_scenario_flow());
}

#[test]
fn test_load_of_invalid_flow_keeps_published_graph() {
    let stored = WireFlow::from_json(
        r#"{ "isActive": true, "order": ["root"], "nodes": { "root": { "text": "Hi", "options": [] } } }"#,
    )
    .unwrap();
    let mut engine = FlowEngine::builder(MemoryStore::with_flow(stored)).build();

    assert_eq!(block_on(engine.load()), LoadOutcome::Unpublishable);

    // The broken flow is there to be repaired...
    assert_eq!(engine.editor().graph().len(), 1);
    assert!(engine.editor().graph().root().unwrap().options.is_empty());

    // ...but visitors still get the starter flow.
    let live = engine.live().expect("previous graph should stay live");
    assert_eq!(live, engine.published().unwrap());
    assert_eq!(live.graph(), validate(&FlowGraph::starter()).unwrap().graph());
}

#[test]
fn test_save_persists_cleaned_graph() {
    let mut engine = FlowEngine::builder(MemoryStore::new())
        .with_graph(create_flow_with_drafts())
        .build();

    let saved = block_on(engine.save()).unwrap().clone();
    assert!(!saved.contains("draft"));

    let stored = engine.store().snapshot().unwrap().unwrap();
    assert_eq!(stored, WireFlow::from(saved.graph()));
    assert!(!stored.nodes.contains_key("draft"));

    // The working copy keeps the draft for further editing.
    assert!(engine.editor().graph().contains("draft"));
}

#[test]
fn test_save_rejected_by_validator_sends_nothing() {
    let mut engine = FlowEngine::builder(MemoryStore::new())
        .with_graph(create_scenario_flow())
        .build();
    engine.editor_mut().update_step_text("root", "");

    let err = block_on(engine.save()).unwrap_err();
    assert!(matches!(err, SaveError::Validation(ValidationError::RootInvalid)));
    assert!(err.to_string().contains("at least one option"));
    assert!(engine.store().snapshot().unwrap().is_none());
}

#[test]
fn test_save_failure_keeps_working_copy() {
    let mut engine = FlowEngine::builder(FailingStore)
        .with_graph(create_scenario_flow())
        .build();
    let id = engine.editor_mut().add_step();
    let before = engine.editor().graph().clone();

    let err = block_on(engine.save()).unwrap_err();
    assert!(matches!(err, SaveError::Persistence(_)));
    assert_eq!(engine.editor().graph(), &before);
    assert!(engine.editor().graph().contains(&id));
    assert!(!engine.published().unwrap().contains(&id));
}

#[test]
fn test_inactive_flow_is_not_live() {
    let mut engine = FlowEngine::builder(MemoryStore::new())
        .with_graph(create_scenario_flow())
        .build();
    engine.editor_mut().set_active(false);
    block_on(engine.save()).unwrap();

    assert!(engine.live().is_none());
    assert!(engine.published().is_some());
}

#[test]
fn test_preview_walks_unsaved_edits() {
    let mut engine = FlowEngine::builder(MemoryStore::new())
        .with_graph(create_scenario_flow())
        .build();
    let editor = engine.editor_mut();
    let id = editor.add_step();
    editor.update_option("root", 0, OptionPatch::next_id(id.clone()));

    let preview = engine.preview().unwrap();
    let mut navigator = Navigator::new(&preview);
    navigator.select(0).unwrap();
    assert_eq!(navigator.current_id(), id);
}

#[test]
fn test_memory_store_enablement_flag() {
    let store = MemoryStore::new();
    assert!(!block_on(store.is_enabled()).unwrap());
    block_on(store.set_enabled(true)).unwrap();
    assert!(block_on(store.is_enabled()).unwrap());
}

#[test]
fn test_file_store_round_trip_in_both_formats() {
    let dir = tempfile::tempdir().unwrap();
    for (name, format) in [("flow.json", StoreFormat::Json), ("flow.bin", StoreFormat::Binary)] {
        let store = FileStore::new(dir.path().join(name), dir.path().join("enabled.json"))
            .with_format(format);
        let mut engine = FlowEngine::builder(store)
            .with_graph(create_rich_flow())
            .build();
        let saved = block_on(engine.save()).unwrap().clone();

        let mut reloaded = FlowEngine::builder(
            FileStore::new(dir.path().join(name), dir.path().join("enabled.json"))
                .with_format(format),
        )
        .with_graph(create_scenario_flow())
        .build();
        assert_eq!(block_on(reloaded.load()), LoadOutcome::Remote);
        assert_eq!(reloaded.editor().graph(), saved.graph());
    }
}

#[test]
fn test_file_store_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("none.json"), dir.path().join("flag.json"));

    assert!(block_on(store.load_flow()).unwrap().is_none());
    assert!(!block_on(store.is_enabled()).unwrap());

    block_on(store.set_enabled(true)).unwrap();
    assert!(block_on(store.is_enabled()).unwrap());
    let raw = std::fs::read_to_string(dir.path().join("flag.json")).unwrap();
    assert_eq!(raw, r#"{"isEnabled":true}"#);
}

#[test]
fn test_corrupt_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("flow.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut engine = FlowEngine::builder(FileStore::new(&path, dir.path().join("flag.json")))
        .with_graph(create_scenario_flow())
        .build();
    assert_eq!(block_on(engine.load()), LoadOutcome::Fallback);
    assert_eq!(engine.editor().graph(), &create_scenario_flow());
}
