// Copyright 2025 Cowboy AI, LLC.

//! Resource-locator path algebra.
//!
//! Locator paths are slash separated (`/news/news-1`). The empty path `/` is
//! the root of a locator tree and the identity of `concat`. Parsing is
//! lenient about duplicate and trailing slashes; `is_clean` checks the
//! stricter shape a generated locator must have.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Pattern every non-root, cleaned locator has to satisfy.
const CLEAN_PATTERN: &str = r"^(/[a-z0-9][a-z0-9_-]*)+$";

fn clean_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(CLEAN_PATTERN).expect("static locator pattern"))
}

/// True when `path` is `/` or made of lowercase slug segments only.
pub fn is_clean(path: &str) -> bool {
    path == "/" || clean_pattern().is_match(path)
}

/// Slash separated path inside one locator tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocatorPath {
    segments: Vec<String>,
}

impl LocatorPath {
    /// The tree root (`/`).
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a path, collapsing empty segments.
    pub fn parse(input: &str) -> Result<Self, EngineError> {
        if input.chars().any(|ch| ch.is_control()) {
            return Err(EngineError::ResourceLocatorNotValid {
                path: input.to_string(),
            });
        }
        let segments = input
            .split('/')
            .filter(|seg| !seg.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self { segments })
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Last segment, `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Parent path, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let mut segments = self.segments.clone();
        segments.pop();
        Some(Self { segments })
    }

    /// Every proper ancestor from the first level down, excluding the root.
    pub fn ancestors(&self) -> Vec<Self> {
        (1..self.segments.len())
            .map(|len| Self {
                segments: self.segments[..len].to_vec(),
            })
            .collect()
    }

    /// Append one segment, returning a new path.
    pub fn append(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Concatenate with another path; the root is the identity.
    pub fn concat(&self, other: &LocatorPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Replace the last segment.
    pub fn with_last(&self, segment: impl Into<String>) -> Self {
        match self.parent() {
            Some(parent) => parent.append(segment),
            None => Self::root().append(segment),
        }
    }

    /// True when `self` equals `prefix` or lies below it.
    pub fn starts_with(&self, prefix: &LocatorPath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Move `self` from below `from` to below `to`.
    pub fn rebase(&self, from: &LocatorPath, to: &LocatorPath) -> Option<Self> {
        if !self.starts_with(from) {
            return None;
        }
        let mut segments = to.segments.clone();
        segments.extend(self.segments[from.segments.len()..].iter().cloned());
        Some(Self { segments })
    }
}

impl Display for LocatorPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            f.write_str("/")?;
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for LocatorPath {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocatorPath::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_path_roundtrip() {
        let path = LocatorPath::parse("/news/news-1").unwrap();
        assert_eq!(path.to_string(), "/news/news-1");
        assert_eq!(path.len(), 2);
        assert_eq!(path.last(), Some("news-1"));
        assert_eq!(path.parent().unwrap().to_string(), "/news");
    }

    #[test]
    fn test_parse_collapses_slashes() {
        let path = LocatorPath::parse("//news///news-1/").unwrap();
        assert_eq!(path.to_string(), "/news/news-1");
        assert!(LocatorPath::parse("").unwrap().is_root());
        assert_eq!(LocatorPath::root().to_string(), "/");
    }

    #[test]
    fn test_concat_obeys_identity() {
        let root = LocatorPath::root();
        let news = LocatorPath::parse("/news").unwrap();
        assert_eq!(root.concat(&news), news);
        assert_eq!(news.concat(&root), news);
    }

    #[test]
    fn test_rebase_moves_subtree_paths() {
        let from = LocatorPath::parse("/news").unwrap();
        let to = LocatorPath::parse("/archive/news").unwrap();
        let child = LocatorPath::parse("/news/news-1/sub-1").unwrap();
        assert_eq!(
            child.rebase(&from, &to).unwrap().to_string(),
            "/archive/news/news-1/sub-1"
        );
        let other = LocatorPath::parse("/newsletter").unwrap();
        assert!(other.rebase(&from, &to).is_none());
    }

    #[test]
    fn test_ancestors_exclude_self_and_root() {
        let path = LocatorPath::parse("/a/b/c").unwrap();
        let ancestors: Vec<String> = path.ancestors().iter().map(|p| p.to_string()).collect();
        assert_eq!(ancestors, vec!["/a", "/a/b"]);
    }

    #[test]
    fn test_clean_pattern_rejects_uppercase_and_spaces() {
        assert!(is_clean("/"));
        assert!(is_clean("/news/news-1"));
        assert!(is_clean("/a_b/c-2"));
        assert!(!is_clean("/News"));
        assert!(!is_clean("/news item"));
        assert!(!is_clean("/-news"));
        assert!(!is_clean("news"));
        assert!(!is_clean("/news/"));
    }
}
