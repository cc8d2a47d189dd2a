//! Identity validation of the three input tables.

use census_core::{FeatureTable, LinkTable, RegionTable, SchemaError, TableKind};

/// Identity names shared by the three tables after validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableIdentity<'a> {
    /// Region identity name (first link level).
    pub region: &'a str,
    /// Feature identity name (second link level).
    pub feature: &'a str,
}

/// Check that the three tables have compatible, named identities.
///
/// 1. Regions and features have a named index.
/// 2. Links have exactly two named levels.
/// 3. Level 0 is named like the region index, level 1 like the feature
///    index.
///
/// An empty feature table is not an error here.
pub fn validate_tables<'a>(
    regions: &'a RegionTable,
    features: &'a FeatureTable,
    links: &'a LinkTable,
) -> Result<TableIdentity<'a>, SchemaError> {
    let region = regions.index().name().ok_or(SchemaError::UnnamedIndex {
        table: TableKind::Regions,
    })?;
    let feature = features.index().name().ok_or(SchemaError::UnnamedIndex {
        table: TableKind::Features,
    })?;

    let levels = links.level_names();
    if levels.len() != 2 {
        return Err(SchemaError::LinkLevelCount {
            found: levels.len(),
        });
    }

    for (level, expected) in [region, feature].into_iter().enumerate() {
        let found = levels[level]
            .as_deref()
            .ok_or(SchemaError::UnnamedLinkLevel { level })?;
        if found != expected {
            return Err(SchemaError::LinkLevelMismatch {
                level,
                expected: expected.to_owned(),
                found: found.to_owned(),
            });
        }
    }

    Ok(TableIdentity { region, feature })
}
