//! Field paths locating a value inside a validated tree.
//!
//! This module provides [`Path`], the ordered list of field names leading
//! from the root of a validation run to one of its nodes.

use std::fmt::{self, Display};

/// A path to a value in a nested structure.
///
/// `Path` represents locations like `books.title` and is built incrementally
/// while a declaration block derives child nodes. Paths are immutable: every
/// operation returns a new path and leaves the receiver untouched.
///
/// Empty segments are dropped instead of rejected, so unnamed derivations
/// (collection elements, wrappers) keep the path of their parent.
///
/// # Example
///
/// ```rust
/// use scrutiny::Path;
///
/// let path = Path::root().append("library").append("books").append("title");
///
/// assert_eq!(path.to_string(), "library.books.title");
/// assert_eq!(path.to_display_string("/"), "library/books/title");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a sequence of segments, skipping empty ones.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::into)
                .filter(|segment: &String| !segment.is_empty())
                .collect(),
        }
    }

    /// Returns a new path with a segment appended.
    ///
    /// An empty segment yields a copy of this path.
    pub fn append(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        if !segment.is_empty() {
            segments.push(segment.to_string());
        }
        Self { segments }
    }

    /// Returns a new path made of this path followed by every segment of `other`.
    pub fn concat(&self, other: &Path) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Joins the segments with the given separator.
    pub fn to_display_string(&self, separator: &str) -> String {
        self.segments.join(separator)
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string("."))
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}
