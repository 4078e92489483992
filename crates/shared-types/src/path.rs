//! # Form Paths
//!
//! Canonical addressing for nodes in the form-state tree.
//!
//! A path is a sequence of segments. Keys and indices may be written in dotted
//! form (`users.0.name`) or with brackets (`users[0].name`); both parse to the
//! same path and render back as the dotted form, which is the canonical
//! identifier used by container registries.

use crate::errors::PathError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single step in a [`FormPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object member.
    Key(String),
    /// Array position.
    Index(usize),
}

impl PathSegment {
    fn from_token(token: &str) -> Self {
        match token.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Key(token.to_string()),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Parsed, canonical form path.
///
/// The empty path is the root of the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FormPath {
    segments: Vec<PathSegment>,
}

impl FormPath {
    /// The root path (no segments).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a path pattern such as `a.b[0].c`.
    pub fn parse(pattern: &str) -> Result<Self, PathError> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for part in pattern.split('.') {
            let part = part.trim();
            if part.is_empty() {
                return Err(PathError::EmptySegment {
                    pattern: pattern.to_string(),
                });
            }
            Self::parse_part(pattern, part, &mut segments)?;
        }

        Ok(Self { segments })
    }

    /// Parse one dot-separated part, which may carry bracketed indices.
    fn parse_part(
        pattern: &str,
        part: &str,
        segments: &mut Vec<PathSegment>,
    ) -> Result<(), PathError> {
        let (head, mut rest) = match part.find('[') {
            Some(open) => part.split_at(open),
            None => (part, ""),
        };

        let head = head.trim();
        if !head.is_empty() {
            segments.push(PathSegment::from_token(head));
        } else if rest.is_empty() {
            return Err(PathError::EmptySegment {
                pattern: pattern.to_string(),
            });
        }

        while !rest.is_empty() {
            let Some(close) = rest.find(']') else {
                return Err(PathError::UnclosedBracket {
                    pattern: pattern.to_string(),
                });
            };
            let inner = rest[1..close].trim();
            if inner.is_empty() {
                return Err(PathError::EmptySegment {
                    pattern: pattern.to_string(),
                });
            }
            let index = inner.parse::<usize>().map_err(|_| PathError::InvalidIndex {
                pattern: pattern.to_string(),
                index: inner.to_string(),
            })?;
            segments.push(PathSegment::Index(index));

            rest = rest[close + 1..].trim_start();
            if !rest.is_empty() && !rest.starts_with('[') {
                return Err(PathError::UnexpectedCharacter {
                    pattern: pattern.to_string(),
                    found: rest.chars().next().unwrap_or_default(),
                });
            }
        }

        Ok(())
    }

    /// Build a path from already-split segments.
    #[must_use]
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Segments of this path, root first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// The path with its last segment stripped. The root has no parent.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Proper ancestors from nearest to farthest, excluding the root.
    ///
    /// `a.b.c` yields `a.b` then `a`.
    pub fn ancestors(&self) -> impl Iterator<Item = FormPath> + '_ {
        (1..self.segments.len()).rev().map(move |len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    /// Append a segment, returning the child path.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Whether `self` is a strict descendant of `other`.
    #[must_use]
    pub fn is_descendant_of(&self, other: &FormPath) -> bool {
        self.segments.len() > other.segments.len()
            && self.segments[..other.segments.len()] == other.segments[..]
    }
}

impl fmt::Display for FormPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for FormPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for FormPath {
    type Error = PathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Serialize for FormPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FormPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
