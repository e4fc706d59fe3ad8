//! Document state store: baseline and working snapshots plus change
//! tracking.
//!
//! The store never surfaces a parse failure to its caller: bad text leaves
//! the previous tree in place, dangling paths resolve to absent, and the
//! session stays intact. Badly-shaped input degrades quietly, it does not
//! throw.

use clusterfile_path::{delete_value, get_value, set_value, Path, Segment};
use clusterfile_schema::{coerce_value, FieldKind};
use log::warn;
use serde_json::{Map, Value};

use crate::change::{now_millis, ChangeRecord, Source};
use crate::clean::clean_value;
use crate::codec::{DocumentCodec, YamlCodec};
use crate::diff::{changed_paths, compute_changes};

pub struct DocumentStore {
    codec: Box<dyn DocumentCodec>,
    baseline_text: String,
    baseline: Value,
    current_text: String,
    current: Value,
    recorded: Vec<ChangeRecord>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// A store speaking the default YAML notation.
    pub fn new() -> Self {
        Self::with_codec(Box::new(YamlCodec))
    }

    pub fn with_codec(codec: Box<dyn DocumentCodec>) -> Self {
        DocumentStore {
            codec,
            baseline_text: String::new(),
            baseline: empty_doc(),
            current_text: String::new(),
            current: empty_doc(),
            recorded: Vec::new(),
        }
    }

    // ── Snapshots ─────────────────────────────────────────────────────────

    /// Replace the baseline from text and clear the transient change list.
    ///
    /// Unparseable text baselines as an empty mapping. The working copy is
    /// untouched.
    pub fn set_baseline(&mut self, text: &str) {
        self.baseline_text = text.to_owned();
        self.baseline = self.parse_or_none(text).unwrap_or_else(empty_doc);
        self.recorded.clear();
    }

    /// Replace the working copy from text.
    ///
    /// The text blob is always stored; the tree is replaced only when the
    /// text parses, so a transient invalid keystroke cannot blow away the
    /// form view. Editor-sourced updates seed the transient change list by
    /// diffing against the previous working tree. Returns whether the tree
    /// was updated.
    pub fn update_current(&mut self, text: &str, source: Source) -> bool {
        self.current_text = text.to_owned();
        match self.parse_or_none(text) {
            Some(doc) => {
                let previous = std::mem::replace(&mut self.current, doc);
                if source == Source::Editor {
                    self.record_edits(&previous);
                }
                true
            }
            None => false,
        }
    }

    pub fn baseline(&self) -> &Value {
        &self.baseline
    }

    pub fn current(&self) -> &Value {
        &self.current
    }

    pub fn baseline_text(&self) -> &str {
        &self.baseline_text
    }

    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    pub(crate) fn set_current_text(&mut self, text: String) {
        self.current_text = text;
    }

    // ── Path access ───────────────────────────────────────────────────────

    /// Read the working copy at `path`.
    pub fn get_path(&self, path: &[Segment]) -> Option<&Value> {
        get_value(&self.current, path)
    }

    /// Write a form edit into the working copy and record it.
    ///
    /// `None` clears the field.
    pub fn set_path(&mut self, path: &[Segment], value: Option<Value>) {
        set_value(&mut self.current, path, value.clone());
        self.record_change(path.to_vec(), value);
    }

    /// Remove the working copy's entry at `path` and record it.
    pub fn delete_path(&mut self, path: &[Segment]) {
        delete_value(&mut self.current, path);
        self.record_change(path.to_vec(), None);
    }

    /// Coerce a raw form input against `kind` and write it at `path`.
    ///
    /// A coercion miss clears the field rather than storing the raw value.
    pub fn apply_input(&mut self, path: &[Segment], raw: &Value, kind: &FieldKind) {
        let coerced = coerce_value(raw, kind);
        self.set_path(path, coerced);
    }

    // ── Change tracking ───────────────────────────────────────────────────

    /// Deep structural inequality between baseline and current at `path`.
    ///
    /// Absent on both sides counts as unchanged.
    pub fn has_changed(&self, path: &[Segment]) -> bool {
        get_value(&self.baseline, path) != get_value(&self.current, path)
    }

    /// Upsert a transient change entry for `path`.
    ///
    /// The transient list is a display hint, never the source of truth; an
    /// entry whose value no longer differs from baseline is dropped so the
    /// list never carries no-ops.
    pub fn record_change(&mut self, path: Path, new_value: Option<Value>) {
        if !self.has_changed(&path) {
            self.recorded.retain(|r| r.path != path);
            return;
        }
        let old_value = get_value(&self.baseline, &path).cloned();
        let timestamp_ms = now_millis();
        if let Some(existing) = self.recorded.iter_mut().find(|r| r.path == path) {
            existing.old_value = old_value;
            existing.new_value = new_value;
            existing.timestamp_ms = timestamp_ms;
            return;
        }
        self.recorded.push(ChangeRecord {
            path,
            old_value,
            new_value,
            timestamp_ms,
        });
    }

    /// The transient recorded-change hints.
    pub fn recorded_changes(&self) -> &[ChangeRecord] {
        &self.recorded
    }

    /// Authoritative change list, recomputed from a full baseline/current
    /// walk.
    pub fn get_changes(&self) -> Vec<ChangeRecord> {
        compute_changes(&self.baseline, &self.current)
    }

    // ── Revert ────────────────────────────────────────────────────────────

    /// Restore the working copy at `path` to the baseline value, or remove
    /// it when the baseline has none.
    pub fn revert_path(&mut self, path: &[Segment]) {
        let baseline_val = get_value(&self.baseline, path).cloned();
        set_value(&mut self.current, path, baseline_val);
        self.recorded.retain(|r| r.path != path);
    }

    /// Revert every changed path whose first segment is `section`.
    pub fn revert_section(&mut self, section: &str) {
        for change in self.get_changes() {
            if change.path.first().and_then(|s| s.as_key()) == Some(section) {
                self.revert_path(&change.path);
            }
        }
    }

    /// The working copy becomes a deep copy of the baseline.
    pub fn revert_all(&mut self) {
        self.current = self.baseline.clone();
        self.current_text = self.baseline_text.clone();
        self.recorded.clear();
    }

    // ── Serialization ─────────────────────────────────────────────────────

    /// Serialize the working copy, pruned and ordered against the
    /// baseline.
    pub fn to_text(&self) -> String {
        let cleaned = clean_value(&self.current, Some(&self.baseline)).unwrap_or_else(empty_doc);
        match self.codec.serialize(&cleaned) {
            Ok(text) => text,
            Err(e) => {
                warn!("clusterfile serialization failed: {e}");
                self.current_text.clone()
            }
        }
    }

    // ── Internal ──────────────────────────────────────────────────────────

    fn parse_or_none(&self, text: &str) -> Option<Value> {
        match self.codec.parse(text) {
            Ok(Value::Null) => Some(empty_doc()),
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("clusterfile text did not parse: {e}");
                None
            }
        }
    }

    fn record_edits(&mut self, previous: &Value) {
        for (path, new_value) in changed_paths(previous, &self.current) {
            if self.has_changed(&path) {
                self.record_change(path, new_value);
            }
        }
    }
}

fn empty_doc() -> Value {
    Value::Object(Map::new())
}
