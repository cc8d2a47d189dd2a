//! Error types for the Census aggregation framework.
//!
//! Split by cause: [`SchemaError`] for malformed table identities and
//! shapes, [`InputError`] for data/configuration combinations that
//! cannot be counted, and [`AggregateError`] wrapping both for the
//! aggregation entry point.

use std::error::Error;
use std::fmt;

use crate::id::TableKind;

/// Malformed input table identity or shape.
///
/// Always raised before any counting work begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A table's identity has no name.
    UnnamedIndex {
        /// The table whose identity is unnamed.
        table: TableKind,
    },
    /// The link identity does not have exactly two components.
    LinkLevelCount {
        /// Number of components found.
        found: usize,
    },
    /// One of the two link identity components has no name.
    UnnamedLinkLevel {
        /// Zero-based component position.
        level: usize,
    },
    /// A link identity component does not match the table it refers to.
    LinkLevelMismatch {
        /// Zero-based component position (0 = region, 1 = feature).
        level: usize,
        /// Identity name of the referenced table.
        expected: String,
        /// Name carried by the link component.
        found: String,
    },
    /// A feature column does not have one value per feature.
    ColumnLength {
        /// Column name.
        column: String,
        /// Number of features in the table.
        expected: usize,
        /// Number of values in the column.
        found: usize,
    },
    /// Two feature columns share a name.
    DuplicateColumn {
        /// The repeated column name.
        column: String,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnnamedIndex { table } => write!(f, "{table} index has no name"),
            Self::LinkLevelCount { found } => {
                write!(f, "links index must have exactly 2 levels, found {found}")
            }
            Self::UnnamedLinkLevel { level } => write!(f, "links index level {level} has no name"),
            Self::LinkLevelMismatch {
                level,
                expected,
                found,
            } => write!(
                f,
                "links index level {level} is named '{found}', expected '{expected}'"
            ),
            Self::ColumnLength {
                column,
                expected,
                found,
            } => write!(
                f,
                "column '{column}' has {found} values, expected {expected}"
            ),
            Self::DuplicateColumn { column } => write!(f, "duplicate column '{column}'"),
        }
    }
}

impl Error for SchemaError {}

/// Semantically invalid combination of data and configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputError {
    /// The feature table is empty and no expected schema is configured.
    EmptyFeaturesWithoutSchema,
    /// Subcategory counting was requested over boolean tag columns.
    SubcategoriesOfBooleanColumns,
    /// A tag filter entry of `true` cannot be expanded into named
    /// subcategories.
    AmbiguousBooleanFilter {
        /// Tag key holding the `true` entry.
        key: String,
    },
    /// Expected features could not be read from their serialized form.
    MalformedExpectedFeatures {
        /// Description of the shape problem.
        reason: String,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFeaturesWithoutSchema => {
                write!(f, "cannot aggregate with no features and no expected schema")
            }
            Self::SubcategoriesOfBooleanColumns => {
                write!(f, "cannot count subcategories with boolean columns")
            }
            Self::AmbiguousBooleanFilter { key } => write!(
                f,
                "cannot expand boolean tag filter value for '{key}' into expected features"
            ),
            Self::MalformedExpectedFeatures { reason } => {
                write!(f, "malformed expected features: {reason}")
            }
        }
    }
}

impl Error for InputError {}

/// Errors from the aggregation entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AggregateError {
    /// The input tables failed identity validation.
    Schema(SchemaError),
    /// The inputs cannot be counted under the current configuration.
    Input(InputError),
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(e) => write!(f, "schema: {e}"),
            Self::Input(e) => write!(f, "input: {e}"),
        }
    }
}

impl Error for AggregateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Schema(e) => Some(e),
            Self::Input(e) => Some(e),
        }
    }
}

impl From<SchemaError> for AggregateError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

impl From<InputError> for AggregateError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_both_sides() {
        let e = SchemaError::LinkLevelMismatch {
            level: 1,
            expected: "feature_id".into(),
            found: "test".into(),
        };
        assert_eq!(
            e.to_string(),
            "links index level 1 is named 'test', expected 'feature_id'"
        );
    }

    #[test]
    fn aggregate_error_chains_source() {
        let e = AggregateError::from(InputError::SubcategoriesOfBooleanColumns);
        let source = e.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("cannot count subcategories with boolean columns")
        );
        assert!(e.to_string().starts_with("input: "));
    }

    #[test]
    fn schema_error_converts() {
        let e: AggregateError = SchemaError::UnnamedIndex {
            table: TableKind::Regions,
        }
        .into();
        assert!(matches!(e, AggregateError::Schema(_)));
        assert_eq!(e.to_string(), "schema: regions index has no name");
    }
}
