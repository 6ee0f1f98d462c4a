//! Parsed dotted variable paths.
//!
//! Connections and driver declarations address variables by dotted strings
//! like `par.G0.C1.a`. External tools resolve that convention by string
//! parsing, so `Display` must render segments joined by `.` with nothing
//! added. Internally the path is an ordered list of segments with explicit
//! join operations, so path construction never goes through ad-hoc string
//! concatenation.

use core::fmt;
use core::str::FromStr;

use crate::error::{MfError, MfResult};

/// An ordered sequence of non-empty path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarPath {
    segments: Vec<String>,
}

impl VarPath {
    /// The empty prefix used as the root of a model tree.
    ///
    /// Not constructible via `parse`; only meaningful as a join prefix.
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// A single-segment path.
    pub fn single(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Parse a dotted path, rejecting empty input and empty segments.
    pub fn parse(s: &str) -> MfResult<Self> {
        if s.is_empty() {
            return Err(MfError::InvalidArg { what: "empty path" });
        }
        let segments: Vec<String> = s.split('.').map(str::to_owned).collect();
        if segments.iter().any(String::is_empty) {
            return Err(MfError::InvalidArg {
                what: "empty path segment",
            });
        }
        Ok(Self { segments })
    }

    /// True for the root prefix.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First segment, if any.
    pub fn head(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// Last segment, if any. For a variable path this is the variable name.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// This path extended by all segments of `other`.
    pub fn join(&self, other: &VarPath) -> VarPath {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        VarPath { segments }
    }

    /// This path extended by one segment.
    pub fn child(&self, segment: impl Into<String>) -> VarPath {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        VarPath { segments }
    }
}

impl fmt::Display for VarPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for VarPath {
    type Err = MfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VarPath::parse(s)
    }
}
