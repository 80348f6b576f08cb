//! Path algebra for addressing nodes inside a flow document.
//!
//! A [`Path`] is an immutable list of [`Segment`]s. The textual form joins the
//! segments with dots (`route.from.steps.1.choice.when.0`); a token made only of
//! ASCII digits is an array index, anything else is an object key. Indices are
//! written without leading zeros, so `steps.007` is rejected and the textual
//! form always round-trips. Keys that contain a literal dot cannot be addressed.

use crate::error::PathError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod resolve;

pub use resolve::{Outcome, resolve, resolve_mut, set};

/// A single step of a path: an object key or an array position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Name(String),
    Index(usize),
}

impl Segment {
    fn from_token(token: &str) -> Self {
        if token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = token.parse() {
                return Segment::Index(index);
            }
        }
        Segment::Name(token.to_string())
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Segment::Name(name) => Some(name),
            Segment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Segment::Index(index) => Some(*index),
            Segment::Name(_) => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => f.write_str(name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::Name(name.to_string())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// The shape of the last two segments of a path, which decides how a
/// structural edit is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    /// A single segment: the root of the document.
    Root,
    /// `(name, index)` or `(index, index)`: an element of an array.
    ArrayElement { index: usize },
    /// `(index, name)`: a named property of an indexed array element,
    /// e.g. the `log` in `steps.0.log`.
    IndexedProperty { index: usize },
    /// `(name, name)`: a plain object property.
    ObjectProperty,
}

/// An address of a node inside a flow document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parses a dot-delimited path.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        let segments = input
            .split('.')
            .enumerate()
            .map(|(position, token)| {
                if token.is_empty() {
                    Err(PathError::EmptySegment { position })
                } else if token.len() > 1
                    && token.starts_with('0')
                    && token.bytes().all(|b| b.is_ascii_digit())
                {
                    Err(PathError::LeadingZero {
                        position,
                        token: token.to_string(),
                    })
                } else {
                    Ok(Segment::from_token(token))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    /// Builds a path from already-typed segments. Returns `None` when empty.
    pub fn from_segments(segments: Vec<Segment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// A single-segment path naming the root wrapper key.
    pub fn root(name: &str) -> Self {
        Self {
            segments: vec![Segment::Name(name.to_string())],
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Paths always hold at least one segment.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn root_segment(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// The last name segment, which is the processor name for step paths.
    pub fn last_name(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(Segment::as_name)
    }

    /// Drops the last segment. Returns `None` for a root path.
    pub fn parent(&self) -> Option<Path> {
        self.ancestor(1)
    }

    /// Drops the last `levels` segments, keeping at least one.
    pub fn ancestor(&self, levels: usize) -> Option<Path> {
        if levels >= self.segments.len() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - levels].to_vec(),
        })
    }

    pub fn join(&self, segment: impl Into<Segment>) -> Path {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub fn child(&self, name: &str) -> Path {
        self.join(Segment::Name(name.to_string()))
    }

    pub fn at(&self, index: usize) -> Path {
        self.join(Segment::Index(index))
    }

    /// Whether `self` equals `prefix` or lies below it.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Replaces the segment at `position` with an index, used to re-target a
    /// path after an earlier splice shifted the array.
    pub(crate) fn with_index_at(&self, position: usize, index: usize) -> Path {
        let mut segments = self.segments.clone();
        segments[position] = Segment::Index(index);
        Self { segments }
    }

    /// Classifies the last two segments.
    pub fn tail(&self) -> Tail {
        let n = self.segments.len();
        if n == 1 {
            return Tail::Root;
        }
        match (&self.segments[n - 2], &self.segments[n - 1]) {
            (_, Segment::Index(index)) => Tail::ArrayElement { index: *index },
            (Segment::Index(index), Segment::Name(_)) => Tail::IndexedProperty { index: *index },
            (Segment::Name(_), Segment::Name(_)) => Tail::ObjectProperty,
        }
    }

    /// Locates the array that owns the element this path points at, together
    /// with the element's position. `None` for object-property tails.
    pub fn owning_array(&self) -> Option<(Path, usize)> {
        match self.tail() {
            Tail::ArrayElement { index } => Some((self.ancestor(1)?, index)),
            Tail::IndexedProperty { index } => Some((self.ancestor(2)?, index)),
            Tail::Root | Tail::ObjectProperty => None,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.iter().join("."))
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Path {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Path> for String {
    fn from(path: Path) -> Self {
        path.to_string()
    }
}
