//! Change records and edit sources.

use std::time::{SystemTime, UNIX_EPOCH};

use clusterfile_path::Path;
use serde_json::Value;

/// Where an accepted edit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The raw text editor.
    Editor,
    /// A structured form widget.
    Form,
    /// An explicit file/sample load.
    Load,
    /// Session restore from persisted state.
    Restore,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Editor => "editor",
            Source::Form => "form",
            Source::Load => "load",
            Source::Restore => "restore",
        }
    }
}

/// A field-level difference between baseline and current.
///
/// `None` on either side means the path is absent in that snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    pub path: Path,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub timestamp_ms: u64,
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
