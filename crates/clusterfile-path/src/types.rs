//! Type definitions for clusterfile paths.

/// A single segment of a path into a document tree.
///
/// Either a mapping key or a list index. Path equality is defined on the
/// segment sequence, never on the rendered string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Mapping key access: `{"key": value}`
    Key(String),
    /// List index access: `[index]`
    Index(usize),
}

impl Segment {
    /// Create a key segment.
    pub fn key(k: impl Into<String>) -> Self {
        Segment::Key(k.into())
    }

    /// Create an index segment.
    pub fn index(i: usize) -> Self {
        Segment::Index(i)
    }

    /// Returns true if this is a key segment.
    pub fn is_key(&self) -> bool {
        matches!(self, Segment::Key(_))
    }

    /// Returns true if this is an index segment.
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }

    /// Get the key if this is a key segment.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Segment::Key(k) => Some(k),
            Segment::Index(_) => None,
        }
    }

    /// Get the index if this is an index segment.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Key(_) => None,
            Segment::Index(i) => Some(*i),
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Segment::Key(s.to_owned())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Segment::Key(s)
    }
}

impl From<usize> for Segment {
    fn from(i: usize) -> Self {
        Segment::Index(i)
    }
}

/// A path into a nested document: an ordered sequence of segments.
pub type Path = Vec<Segment>;

/// Construct a [`Path`] from a sequence of segments.
///
/// String literals become key segments, integers become index segments.
///
/// # Example
///
/// ```
/// use clusterfile_path::{path, Segment};
///
/// let p = path!["hosts", 0, "role"];
/// assert_eq!(p[1], Segment::Index(0));
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::new()
    };
    ($($seg:expr),+ $(,)?) => {{
        let mut p = $crate::Path::new();
        $(
            p.push($crate::Segment::from($seg));
        )+
        p
    }};
}
