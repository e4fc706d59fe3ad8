//! Clusterfile path utilities.
//!
//! A path addresses a field inside a nested clusterfile document. The
//! string form joins plain keys with `.` and uses bracket notation for
//! list indices and for keys containing special characters; the parsed
//! form is a sequence of [`Segment`]s, which is what every comparison and
//! recursion in the editor works on.
//!
//! # Example
//!
//! ```
//! use clusterfile_path::{build_path, get_value, parse_path, Segment};
//!
//! let path = parse_path(r#"hosts["node-1.example.com"].role"#);
//! assert_eq!(
//!     path,
//!     vec![
//!         Segment::key("hosts"),
//!         Segment::key("node-1.example.com"),
//!         Segment::key("role"),
//!     ],
//! );
//! assert_eq!(build_path(&path), r#"hosts["node-1.example.com"].role"#);
//!
//! let doc = serde_json::json!({
//!     "hosts": {"node-1.example.com": {"role": "worker"}}
//! });
//! assert_eq!(get_value(&doc, &path), Some(&serde_json::json!("worker")));
//! ```

pub mod access;
pub mod codec;
pub mod types;

pub use access::{delete_value, get_value, get_value_mut, set_value};
pub use codec::{build_path, is_bare_key, is_canonical_index, parse_path};
pub use types::{Path, Segment};
