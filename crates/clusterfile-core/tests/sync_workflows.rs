use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clusterfile_core::{
    load_session, save_session, DocumentStore, EditorMode, MemorySessionStore, SessionSnapshot,
    Source, SyncCoordinator, SyncListener,
};
use clusterfile_path::parse_path;
use serde_json::{json, Value};

#[derive(Default)]
struct Counters {
    text_pushes: usize,
    form_rerenders: usize,
    validation: usize,
    last_changes: Option<usize>,
    last_text: String,
}

struct Ui(Rc<RefCell<Counters>>);

impl SyncListener for Ui {
    fn validation_changed(&mut self, _doc: &Value) {
        self.0.borrow_mut().validation += 1;
    }
    fn changes_changed(&mut self, count: usize) {
        self.0.borrow_mut().last_changes = Some(count);
    }
    fn form_rerender(&mut self) {
        self.0.borrow_mut().form_rerenders += 1;
    }
    fn editor_text_replaced(&mut self, text: &str) {
        let mut ui = self.0.borrow_mut();
        ui.text_pushes += 1;
        ui.last_text = text.to_owned();
    }
}

fn session(text: &str) -> (SyncCoordinator, Rc<RefCell<Counters>>) {
    let mut store = DocumentStore::new();
    store.set_baseline(text);
    store.update_current(text, Source::Load);
    let ui = Rc::new(RefCell::new(Counters::default()));
    let mut coord = SyncCoordinator::new(store)
        .with_windows(Duration::from_millis(300), Duration::from_millis(50));
    coord.add_listener(Box::new(Ui(ui.clone())));
    (coord, ui)
}

#[test]
fn test_form_edit_round_does_not_loop() {
    let (mut coord, ui) = session("name: foo\ncount: 1\n");
    let t0 = Instant::now();

    // Form edit: tree first, then the debounced Document→Text sync.
    coord
        .store_mut()
        .set_path(&parse_path("count"), Some(json!(2)));
    coord.form_changed(t0);
    coord.poll(t0 + Duration::from_millis(300));

    assert_eq!(ui.borrow().text_pushes, 1);
    assert_eq!(ui.borrow().last_changes, Some(1));

    // The editor widget fires its own change event for the push we just
    // made. It must be swallowed, not fed back into Text→Document.
    let echoed = ui.borrow().last_text.clone();
    coord.editor_changed(echoed, t0 + Duration::from_millis(310));
    coord.poll(t0 + Duration::from_millis(2000));

    assert_eq!(ui.borrow().text_pushes, 1);
    assert_eq!(ui.borrow().form_rerenders, 0);
}

#[test]
fn test_editor_edit_rerenders_form_and_badges() {
    let (mut coord, ui) = session("name: foo\ncount: 1\n");
    let t0 = Instant::now();

    coord.editor_changed("name: foo\ncount: 7\n", t0);
    coord.poll(t0 + Duration::from_millis(300));

    assert_eq!(coord.store().get_path(&parse_path("count")), Some(&json!(7)));
    assert_eq!(ui.borrow().form_rerenders, 1);
    assert_eq!(ui.borrow().validation, 1);
    assert_eq!(ui.borrow().last_changes, Some(1));
    // The transient hint list was seeded by the editor sync.
    assert_eq!(coord.store().recorded_changes().len(), 1);
}

#[test]
fn test_rapid_form_edits_coalesce_to_one_push() {
    let (mut coord, ui) = session("count: 1\n");
    let t0 = Instant::now();

    for (i, value) in [2, 3, 4].iter().enumerate() {
        coord
            .store_mut()
            .set_path(&parse_path("count"), Some(json!(value)));
        coord.form_changed(t0 + Duration::from_millis(50 * i as u64));
    }
    coord.poll(t0 + Duration::from_millis(250));
    assert_eq!(ui.borrow().text_pushes, 0);

    coord.poll(t0 + Duration::from_millis(450));
    assert_eq!(ui.borrow().text_pushes, 1);
    let pushed: Value = serde_yaml::from_str(&ui.borrow().last_text).unwrap();
    assert_eq!(pushed, json!({"count": 4}));
}

#[test]
fn test_invalid_keystroke_never_reaches_views() {
    let (mut coord, ui) = session("name: foo\n");
    let t0 = Instant::now();

    coord.editor_changed("name: [mid-edit", t0);
    coord.poll(t0 + Duration::from_millis(300));

    // No sync happened this round: views keep the last-good state.
    assert_eq!(coord.store().current(), &json!({"name": "foo"}));
    assert_eq!(ui.borrow().validation, 0);
    assert_eq!(ui.borrow().form_rerenders, 0);

    // The next valid edit flows normally.
    coord.editor_changed("name: bar\n", t0 + Duration::from_millis(400));
    coord.poll(t0 + Duration::from_millis(700));
    assert_eq!(coord.store().current(), &json!({"name": "bar"}));
}

#[test]
fn test_session_save_and_restore_workflow() {
    let (mut coord, _ui) = session("name: foo\ncount: 1\n");
    let t0 = Instant::now();

    coord
        .store_mut()
        .set_path(&parse_path("count"), Some(json!(2)));
    coord.form_changed(t0);
    coord.poll(t0 + Duration::from_millis(300));

    let mut persisted = MemorySessionStore::new();
    let snapshot = SessionSnapshot {
        current_text: coord.store().current_text().to_owned(),
        baseline_text: coord.store().baseline_text().to_owned(),
        mode: coord.mode(),
        section: "cluster".to_owned(),
        filename: "prod.clusterfile".to_owned(),
    };
    save_session(&mut persisted, &snapshot);

    // A fresh session picks up where the old one left off.
    let restored = load_session(&persisted);
    assert_eq!(restored.mode, EditorMode::Guided);
    assert_eq!(restored.section, "cluster");

    let mut store = DocumentStore::new();
    store.set_baseline(&restored.baseline_text);
    store.update_current(&restored.current_text, Source::Restore);

    let changes = store.get_changes();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].old_value, Some(json!(1)));
    assert_eq!(changes[0].new_value, Some(json!(2)));
    // Restore-sourced updates never seed the transient hint list.
    assert!(store.recorded_changes().is_empty());
}
