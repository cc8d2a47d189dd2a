//! Expected-feature specification types.
//!
//! An [`ExpectedFeatures`] value describes the output columns a caller
//! wants every aggregation to produce. It comes in three shapes: an
//! explicit list of column names, a flat tag filter, or a filter grouped
//! under named categories. Compile it with
//! [`ExpectedSchema::compile`](crate::ExpectedSchema::compile).

use census_core::InputError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Allowed values for one tag key in a [`TagFilter`].
///
/// # Examples
///
/// ```
/// use census_schema::TagFilterValue;
///
/// let v = TagFilterValue::from("pub");
/// assert_eq!(v, TagFilterValue::Value("pub".into()));
///
/// let all = TagFilterValue::from(true);
/// assert!(matches!(all, TagFilterValue::Bool(true)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagFilterValue {
    /// `true` selects every value of the tag; `false` selects none.
    Bool(bool),
    /// A single allowed value.
    Value(String),
    /// Several allowed values.
    Values(Vec<String>),
}

impl TagFilterValue {
    /// Build a multi-value entry.
    pub fn values<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::Values(values.into_iter().map(Into::into).collect())
    }
}

impl From<bool> for TagFilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for TagFilterValue {
    fn from(v: &str) -> Self {
        Self::Value(v.to_owned())
    }
}

impl From<String> for TagFilterValue {
    fn from(v: String) -> Self {
        Self::Value(v)
    }
}

impl From<Vec<String>> for TagFilterValue {
    fn from(v: Vec<String>) -> Self {
        Self::Values(v)
    }
}

/// Tag key → allowed values, e.g. `{"amenity": ["pub", "bar"]}`.
pub type TagFilter = IndexMap<String, TagFilterValue>;

/// Group name → tag filter, e.g. `{"nightlife": {"amenity": "pub"}}`.
pub type GroupedTagFilter = IndexMap<String, TagFilter>;

/// Description of the expected output columns.
///
/// # Examples
///
/// ```
/// use census_schema::{ExpectedFeatures, TagFilterValue};
///
/// let spec = ExpectedFeatures::from_json(r#"{"amenity": ["pub", "bar"]}"#).unwrap();
/// let ExpectedFeatures::FlatFilter(filter) = spec else { panic!("flat filter") };
/// assert_eq!(filter["amenity"], TagFilterValue::values(["pub", "bar"]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedFeatures {
    /// Column names used verbatim, in the given order.
    ExplicitList(Vec<String>),
    /// A flat tag filter.
    FlatFilter(TagFilter),
    /// A tag filter grouped under category names.
    GroupedFilter(GroupedTagFilter),
}

impl ExpectedFeatures {
    /// Explicit list of column names.
    pub fn list<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::ExplicitList(names.into_iter().map(Into::into).collect())
    }

    /// Flat tag filter from `(key, value)` pairs.
    pub fn flat<K: Into<String>, V: Into<TagFilterValue>>(
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        Self::FlatFilter(collect_filter(entries))
    }

    /// Grouped tag filter from `(group, filter)` pairs.
    pub fn grouped<G: Into<String>>(groups: impl IntoIterator<Item = (G, TagFilter)>) -> Self {
        Self::GroupedFilter(groups.into_iter().map(|(g, f)| (g.into(), f)).collect())
    }

    /// Read expected features from JSON.
    ///
    /// An array of strings is an explicit list; an object of
    /// strings/arrays/booleans is a flat filter; an object of objects is
    /// a grouped filter. Anything else is rejected.
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(|e| InputError::MalformedExpectedFeatures {
            reason: e.to_string(),
        })
    }
}

/// Build a [`TagFilter`] from `(key, value)` pairs.
pub fn collect_filter<K: Into<String>, V: Into<TagFilterValue>>(
    entries: impl IntoIterator<Item = (K, V)>,
) -> TagFilter {
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
