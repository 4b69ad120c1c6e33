/*!
# Dot Path AST and Builder

Defines the parsed form of a dot path and a fluent builder for constructing
one without going through text.

A dot path is parsed from text with [`str::parse`]:

```
use dotpath::{DotPath, Segment};
let path: DotPath = r#".author[0]["@id"]"#.parse().expect("Invalid dot path");
assert_eq!(
    path.segments(),
    [Segment::key("author"), Segment::Index(0), Segment::key("@id")]
);
```

or built directly:

```
use dotpath::path::DotPathBuilder;
let path = DotPathBuilder::new()
    .key("works")
    .slice(1..3)
    .key("pubdate")
    .build()
    .unwrap();
assert_eq!(".works[1:3].pubdate", path.to_string());
```
*/
use std::{
    fmt::{self, Display},
    ops::{Bound, RangeBounds},
    str::FromStr,
};

use super::{DotPathError, parse_dot_path};

/// One step of a dot path.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Segment {
    /// Object lookup by key, e.g., `.name` or `["@id"]`
    Key(String),
    /// Array lookup by position, e.g., `[3]`. Negative positions are kept so
    /// that evaluation can report them as out of bounds.
    Index(i64),
    /// Half-open array range, e.g., `[1:3]`, `[2:]`, `[:]` or `[]`.
    ///
    /// NOTE: The end index is exclusive, so the range is `start..end`.
    Slice(Option<usize>, Option<usize>),
}

impl Segment {
    /// Helper for ergonomic construction of key segments
    pub fn key<T: Into<String>>(name: T) -> Self {
        Self::Key(name.into())
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(name) => {
                if needs_quoting(name) {
                    write!(f, "[\"{}\"]", escape_for_quoted_key(name))
                } else {
                    write!(f, ".{name}")
                }
            }
            Self::Index(idx) => write!(f, "[{idx}]"),
            Self::Slice(start, end) => {
                write!(f, "[")?;
                if let Some(s) = start {
                    write!(f, "{s}")?;
                }
                write!(f, ":")?;
                if let Some(e) = end {
                    write!(f, "{e}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Returns `true` if a key cannot be written after a `.` and must use the
/// bracketed, quoted form instead.
fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || name.contains(|c: char| matches!(c, '.' | '[' | ']' | '"' | '\\'))
}

/// Escape characters inside a quoted key for display. This is the inverse
/// of the unescaping the parser applies: `"` -> `\"` and `\` -> `\\`.
fn escape_for_quoted_key(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            _ => result.push(c),
        }
    }
    result
}

/// A parsed dot path: a non-empty, ordered list of [`Segment`]s.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct DotPath {
    segments: Vec<Segment>,
}

impl DotPath {
    /// Wrap a list of segments, rejecting the empty list.
    ///
    /// # Errors
    ///
    /// Returns [`DotPathError::InvalidPath`] if `segments` is empty.
    pub fn new(segments: Vec<Segment>) -> Result<Self, DotPathError> {
        if segments.is_empty() {
            return Err(DotPathError::InvalidPath {
                path: String::new(),
                reason: "a dot path needs at least one segment".to_string(),
            });
        }
        Ok(Self { segments })
    }

    /// The segments in left-to-right order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments, which is also the navigation depth.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for DotPath {
    type Err = DotPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dot_path(s)
    }
}

/// Builder for constructing dot paths
#[derive(Debug, Default)]
pub struct DotPathBuilder {
    /// The segments pushed so far
    segments: Vec<Segment>,
}

impl DotPathBuilder {
    /// Creates a new `DotPathBuilder` with no segments.
    #[must_use]
    pub const fn new() -> Self {
        Self { segments: vec![] }
    }

    /// Appends an object key lookup.
    #[must_use]
    pub fn key(mut self, name: &str) -> Self {
        self.segments.push(Segment::key(name));
        self
    }

    /// Appends an array index lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotpath::path::DotPathBuilder;
    /// let path = DotPathBuilder::new()
    ///     .key("works")
    ///     .index(0)
    ///     .key("title")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(".works[0].title", path.to_string());
    /// ```
    #[must_use]
    pub fn index(mut self, idx: i64) -> Self {
        self.segments.push(Segment::Index(idx));
        self
    }

    /// Appends an array slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotpath::path::DotPathBuilder;
    /// let path =
    ///     DotPathBuilder::new().key("tags").slice(2..).build().unwrap();
    /// assert_eq!(".tags[2:]", path.to_string());
    /// ```
    #[must_use]
    pub fn slice(mut self, range: impl RangeBounds<usize>) -> Self {
        let start = match range.start_bound() {
            Bound::Included(&s) => Some(s),
            Bound::Excluded(&s) => Some(s.saturating_add(1)),
            Bound::Unbounded => None,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => Some(e.saturating_add(1)),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => None,
        };
        self.segments.push(Segment::Slice(start, end));
        self
    }

    /// Return the built path.
    ///
    /// # Errors
    ///
    /// Returns [`DotPathError::InvalidPath`] if no segment was added.
    pub fn build(self) -> Result<DotPath, DotPathError> {
        DotPath::new(self.segments)
    }
}
