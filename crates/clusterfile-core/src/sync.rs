//! Editor/form synchronization with debounce and echo suppression.
//!
//! Two one-directional flows that must never trigger each other
//! recursively: text-editor changes parse into the working tree, form
//! edits serialize back into the text editor. Pushing serialized text
//! into the editor makes the editor widget fire its own change event; a
//! short-lived suppression window swallows that echo so the round stops
//! there. The editor-originated direction is the source of truth and is
//! never suppressed.
//!
//! There is no async runtime here. The host event loop owns time: it
//! reports edits with a timestamp and calls [`SyncCoordinator::poll`]
//! from its timer tick. All mutation flows through `&mut self`, which is
//! what makes the single-owner discipline of the original event model
//! hold on any host.

use std::time::{Duration, Instant};

use log::debug;
use serde_json::Value;

use crate::change::Source;
use crate::store::DocumentStore;

/// Which view the user is editing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Structured form with a synced text panel.
    Guided,
    /// Raw text only; the form does not redraw on editor syncs.
    Advanced,
}

impl EditorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorMode::Guided => "guided",
            EditorMode::Advanced => "advanced",
        }
    }

    pub fn from_str(s: &str) -> Option<EditorMode> {
        match s {
            "guided" => Some(EditorMode::Guided),
            "advanced" => Some(EditorMode::Advanced),
            _ => None,
        }
    }
}

/// Fire-and-forget notification sinks for the surrounding UI.
///
/// Every method defaults to a no-op so embedders implement only what they
/// render. None of them return anything; the core never waits on the UI.
pub trait SyncListener {
    /// The working tree changed; revalidate and redraw the validation
    /// badge.
    fn validation_changed(&mut self, _doc: &Value) {}
    /// The number of changed fields against baseline moved.
    fn changes_changed(&mut self, _count: usize) {}
    /// The header modified indicator should show or hide.
    fn modified_changed(&mut self, _modified: bool) {}
    /// The structured form should redraw from the working tree.
    fn form_rerender(&mut self) {}
    /// Replace the text editor's contents with the serialized document.
    fn editor_text_replaced(&mut self, _text: &str) {}
}

/// Debounce window per direction.
pub const SYNC_DEBOUNCE: Duration = Duration::from_millis(300);
/// How long after a form→editor push the editor's echo is swallowed.
/// Sized to outlast the editor widget's change-notification latency.
pub const ECHO_HOLD: Duration = Duration::from_millis(50);

struct PendingEditorSync {
    text: String,
    due: Instant,
}

pub struct SyncCoordinator {
    store: DocumentStore,
    mode: EditorMode,
    debounce: Duration,
    echo_hold: Duration,
    pending_editor: Option<PendingEditorSync>,
    pending_form: Option<Instant>,
    suppress_until: Option<Instant>,
    listeners: Vec<Box<dyn SyncListener>>,
}

impl SyncCoordinator {
    pub fn new(store: DocumentStore) -> Self {
        SyncCoordinator {
            store,
            mode: EditorMode::Guided,
            debounce: SYNC_DEBOUNCE,
            echo_hold: ECHO_HOLD,
            pending_editor: None,
            pending_form: None,
            suppress_until: None,
            listeners: Vec::new(),
        }
    }

    /// Override the timing windows (tests mostly).
    pub fn with_windows(mut self, debounce: Duration, echo_hold: Duration) -> Self {
        self.debounce = debounce;
        self.echo_hold = echo_hold;
        self
    }

    pub fn add_listener(&mut self, listener: Box<dyn SyncListener>) {
        self.listeners.push(listener);
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DocumentStore {
        &mut self.store
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
    }

    /// The text editor reported a change.
    ///
    /// Swallowed while the suppression window from a form-originated push
    /// is open: that change is our own echo, not the user typing.
    /// Otherwise the Text→Document slot is (re)armed; rapid edits coalesce
    /// to one sync carrying the latest text.
    pub fn editor_changed(&mut self, text: impl Into<String>, now: Instant) {
        if let Some(until) = self.suppress_until {
            if now < until {
                debug!("editor change swallowed (form sync echo)");
                return;
            }
        }
        self.pending_editor = Some(PendingEditorSync {
            text: text.into(),
            due: now + self.debounce,
        });
    }

    /// A form field was edited (the working tree is already updated).
    ///
    /// (Re)arms the Document→Text slot; rapid edits coalesce.
    pub fn form_changed(&mut self, now: Instant) {
        self.pending_form = Some(now + self.debounce);
    }

    /// Fire whichever debounce slots have come due.
    ///
    /// The editor-originated direction runs first: it is the source of
    /// truth and is never suppressed.
    pub fn poll(&mut self, now: Instant) {
        if self.pending_editor.as_ref().is_some_and(|p| now >= p.due) {
            if let Some(pending) = self.pending_editor.take() {
                self.sync_from_editor(pending.text);
            }
        }
        if self.pending_form.is_some_and(|due| now >= due) {
            self.pending_form = None;
            self.sync_from_form(now);
        }
    }

    /// True while either direction has a sync waiting to fire.
    pub fn has_pending(&self) -> bool {
        self.pending_editor.is_some() || self.pending_form.is_some()
    }

    // ── Directions ────────────────────────────────────────────────────────

    fn sync_from_editor(&mut self, text: String) {
        if !self.store.update_current(&text, Source::Editor) {
            debug!("editor sync skipped: text does not parse");
            return;
        }
        if self.mode == EditorMode::Guided {
            for listener in &mut self.listeners {
                listener.form_rerender();
            }
        }
        self.notify_badges();
    }

    fn sync_from_form(&mut self, now: Instant) {
        let text = self.store.to_text();
        self.store.set_current_text(text.clone());
        // Open the suppression window before the push: the editor widget
        // fires its change event during or shortly after it.
        self.suppress_until = Some(now + self.echo_hold);
        for listener in &mut self.listeners {
            listener.editor_text_replaced(&text);
        }
        self.notify_badges();
    }

    fn notify_badges(&mut self) {
        let count = self.store.get_changes().len();
        for listener in &mut self.listeners {
            listener.validation_changed(self.store.current());
            listener.changes_changed(count);
            listener.modified_changed(count > 0);
        }
    }
}
