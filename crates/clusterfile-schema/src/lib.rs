//! Field kinds and value coercion for the clusterfile editor.
//!
//! Form widgets hand the editor raw inputs (mostly strings). Before a raw
//! input lands in the document tree it is coerced to the kind the field's
//! schema fragment expects; a coercion miss means "clear the field", not
//! an error. Schema *validation* is a separate concern and lives outside
//! this crate; the fragment is consulted only for its kind shape.

pub mod coerce;
pub mod kind;

pub use coerce::coerce_value;
pub use kind::{FieldKind, UnionBranch};
