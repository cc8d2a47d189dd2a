//! Region and feature keys, and the well-known identity names.

use std::fmt;

/// Conventional identity name of a region table.
pub const REGIONS_INDEX: &str = "region_id";

/// Conventional identity name of a feature table.
pub const FEATURES_INDEX: &str = "feature_id";

/// Name of the geometry-like column dropped from feature tables
/// before counting.
pub const GEOMETRY_COLUMN: &str = "geometry";

/// Identity of a single region or feature.
///
/// Keys are either integers or strings. Ordering places every integer
/// before every string, so mixed key sets still sort deterministically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Integer key (e.g. a positional id).
    Int(i64),
    /// String key (e.g. an H3 cell or an OSM `way/123` id).
    Str(String),
}

impl Key {
    /// Borrow the key as a string slice, if it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// The key as an integer, if it is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Key {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Key {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

/// Which single-level input table an identity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// The region table.
    Regions,
    /// The feature table.
    Features,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regions => f.write_str("regions"),
            Self::Features => f.write_str("features"),
        }
    }
}
