//! Clusterfile editor core: document state and change tracking.
//!
//! Owns the authoritative in-memory clusterfile: a baseline snapshot, a
//! live working copy, field-level change detection against the baseline,
//! and the editor/form synchronization that keeps the textual and
//! structured views consistent without feedback loops.
//!
//! Rendering, schema validation and template processing live outside this
//! crate and talk to it through narrow seams: [`DocumentCodec`] for the
//! textual notation, [`SyncListener`] for UI notifications, and
//! [`SessionStore`] for persistence.

pub mod change;
pub mod clean;
pub mod codec;
pub mod diff;
pub mod redact;
pub mod session;
pub mod store;
pub mod sync;
pub mod text;

pub use change::{ChangeRecord, Source};
pub use clean::clean_value;
pub use codec::{CodecError, DocumentCodec, YamlCodec};
pub use diff::compute_changes;
pub use redact::{matches_redaction_path, redact_secrets, REDACTED_PLACEHOLDER};
pub use session::{
    load_session, save_session, MemorySessionStore, SessionSnapshot, SessionStore,
    DEFAULT_FILENAME, DEFAULT_SECTION,
};
pub use store::DocumentStore;
pub use sync::{EditorMode, SyncCoordinator, SyncListener, ECHO_HOLD, SYNC_DEBOUNCE};
pub use text::{changed_lines, find_line_for_path};
