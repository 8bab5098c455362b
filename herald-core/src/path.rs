//! Hierarchical topic paths.
//!
//! A [`TopicPath`] is a slash-delimited key such as `/error/network`. Paths
//! form a tree: `/error` is the parent of `/error/network` and
//! `/error/runtime`, and `/` is the root of every path.
//!
//! # Normalization
//!
//! Paths are normalized on construction so that comparisons never have to
//! care about formatting:
//!
//! - a leading `/` is always present,
//! - empty segments (`//`, trailing `/`) are dropped,
//! - the root is spelled `/`.
//!
//! ```rust,ignore
//! let path = TopicPath::new("error//network/");
//! assert_eq!(path.as_str(), "/error/network");
//! ```

use std::fmt;

const SEPARATOR: char = '/';

/// A normalized, slash-delimited topic path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicPath(String);

impl TopicPath {
    /// The root path, `/`, which is a prefix of every path.
    pub fn root() -> Self {
        Self(SEPARATOR.to_string())
    }

    /// Build a path from a string, normalizing separators.
    pub fn new(path: impl AsRef<str>) -> Self {
        let mut normalized = String::with_capacity(path.as_ref().len() + 1);
        for segment in segments_of(path.as_ref()) {
            normalized.push(SEPARATOR);
            normalized.push_str(segment);
        }
        if normalized.is_empty() {
            normalized.push(SEPARATOR);
        }
        Self(normalized)
    }

    /// The normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Iterate over the path's segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        segments_of(&self.0)
    }

    /// Append `subpath` below this path.
    ///
    /// A leading `/` on `subpath` does not make it absolute; it is always
    /// nested under `self`. An empty subpath yields a copy of `self`.
    pub fn join(&self, subpath: impl AsRef<str>) -> Self {
        let mut joined = if self.is_root() {
            String::new()
        } else {
            self.0.clone()
        };
        for segment in segments_of(subpath.as_ref()) {
            joined.push(SEPARATOR);
            joined.push_str(segment);
        }
        if joined.is_empty() {
            joined.push(SEPARATOR);
        }
        Self(joined)
    }

    /// Whether `self` is a hierarchical prefix of `other`.
    ///
    /// Comparison is per segment: `/error` is a prefix of `/error` and of
    /// `/error/network`, but not of `/errors`.
    pub fn is_prefix_of(&self, other: &TopicPath) -> bool {
        let mut theirs = other.segments();
        self.segments()
            .all(|segment| theirs.next().is_some_and(|candidate| candidate == segment))
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<TopicPath> {
        if self.is_root() {
            return None;
        }
        let cut = self.0.rfind(SEPARATOR).unwrap_or(0);
        Some(TopicPath::new(&self.0[..cut]))
    }
}

fn segments_of(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|segment| !segment.is_empty())
}

impl Default for TopicPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for TopicPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TopicPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TopicPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for TopicPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&TopicPath> for TopicPath {
    fn from(path: &TopicPath) -> Self {
        path.clone()
    }
}
