//! Canonical aggregation fixtures.
//!
//! Three H3 regions, four OSM ways tagged with `leisure` / `amenity`, and
//! links placing each way in one region:
//!
//! | region | features |
//! |---|---|
//! | `891e2040897ffff` | `way/1533817161` (amenity=pub), `way/312457834` (untagged) |
//! | `891e2040d4bffff` | `way/312457804` (leisure=playground) |
//! | `891e2040d5bffff` | `way/312457812` (leisure=adult_gaming_centre, amenity=pub) |
//!
//! The same layout exists with integer keys and with boolean tags.

use census_core::{
    FeatureTable, Index, Key, LinkTable, RegionTable, TagColumn, FEATURES_INDEX, GEOMETRY_COLUMN,
    REGIONS_INDEX,
};

pub const REGION_897: &str = "891e2040897ffff";
pub const REGION_D4B: &str = "891e2040d4bffff";
pub const REGION_D5B: &str = "891e2040d5bffff";

pub const H3_REGIONS: [&str; 3] = [REGION_897, REGION_D4B, REGION_D5B];

pub const OSM_WAYS: [&str; 4] = [
    "way/312457804",
    "way/1533817161",
    "way/312457812",
    "way/312457834",
];

pub const BOOLEAN_FEATURE_IDS: [&str; 4] = [
    "08b1e20413d93fff0001b800472ebc77",
    "08b1e20414ac2fff0001ad7039286361",
    "08b1e20414ac2fff0001babbc20fb8eb",
    "08b1e20414ac1fff0001bad7c31922fa",
];

/// The three input tables of one aggregation call.
#[derive(Clone, Debug)]
pub struct Tables {
    pub regions: RegionTable,
    pub features: FeatureTable,
    pub links: LinkTable,
}

// ── Regions ────────────────────────────────────────────────────────

pub fn h3_regions() -> RegionTable {
    RegionTable::new(Index::new(REGIONS_INDEX, H3_REGIONS))
}

pub fn int_regions() -> RegionTable {
    RegionTable::new(Index::new(REGIONS_INDEX, [0, 1, 2]))
}

pub fn empty_regions() -> RegionTable {
    RegionTable::new(Index::new(REGIONS_INDEX, Vec::<Key>::new()))
}

// ── Features ───────────────────────────────────────────────────────

fn osm_columns() -> [(&'static str, TagColumn); 3] {
    [
        (
            "leisure",
            TagColumn::categorical([
                Some("playground"),
                None,
                Some("adult_gaming_centre"),
                None,
            ]),
        ),
        (
            "amenity",
            TagColumn::categorical([None, Some("pub"), Some("pub"), None]),
        ),
        (
            GEOMETRY_COLUMN,
            TagColumn::categorical([
                Some("POLYGON ((17.03 51.10, 17.04 51.10, 17.04 51.11, 17.03 51.10))"),
                Some("POINT (17.02 51.11)"),
                Some("POLYGON ((17.05 51.10, 17.06 51.10, 17.06 51.11, 17.05 51.10))"),
                Some("POINT (17.01 51.12)"),
            ]),
        ),
    ]
}

fn features_from(
    index: Index,
    columns: impl IntoIterator<Item = (&'static str, TagColumn)>,
) -> FeatureTable {
    match FeatureTable::from_columns(index, columns) {
        Ok(table) => table,
        Err(e) => panic!("fixture columns are malformed: {e}"),
    }
}

pub fn osm_features() -> FeatureTable {
    features_from(Index::new(FEATURES_INDEX, OSM_WAYS), osm_columns())
}

pub fn int_features() -> FeatureTable {
    features_from(Index::new(FEATURES_INDEX, [0, 1, 2, 3]), osm_columns())
}

pub fn boolean_features() -> FeatureTable {
    features_from(
        Index::new(FEATURES_INDEX, BOOLEAN_FEATURE_IDS),
        [
            ("leisure", TagColumn::boolean([true, false, true, false])),
            ("amenity", TagColumn::boolean([false, true, true, false])),
        ],
    )
}

pub fn empty_features() -> FeatureTable {
    FeatureTable::new(Index::new(FEATURES_INDEX, Vec::<Key>::new()))
}

pub fn unnamed_features() -> FeatureTable {
    features_from(Index::unnamed(OSM_WAYS), osm_columns())
}

// ── Links ──────────────────────────────────────────────────────────

pub fn osm_links() -> LinkTable {
    LinkTable::new(
        REGIONS_INDEX,
        FEATURES_INDEX,
        [
            (REGION_D4B, OSM_WAYS[0]),
            (REGION_897, OSM_WAYS[1]),
            (REGION_897, OSM_WAYS[3]),
            (REGION_D5B, OSM_WAYS[2]),
        ],
    )
}

pub fn int_links() -> LinkTable {
    LinkTable::new(REGIONS_INDEX, FEATURES_INDEX, [(1, 0), (0, 1), (0, 3), (2, 2)])
}

pub fn boolean_links() -> LinkTable {
    LinkTable::new(
        REGIONS_INDEX,
        FEATURES_INDEX,
        [
            (REGION_D4B, BOOLEAN_FEATURE_IDS[0]),
            (REGION_897, BOOLEAN_FEATURE_IDS[1]),
            (REGION_897, BOOLEAN_FEATURE_IDS[3]),
            (REGION_D5B, BOOLEAN_FEATURE_IDS[2]),
        ],
    )
}

pub fn empty_links() -> LinkTable {
    LinkTable::new(REGIONS_INDEX, FEATURES_INDEX, Vec::<(Key, Key)>::new())
}

/// Links whose region level is named `test` instead of `region_id`.
pub fn renamed_links() -> LinkTable {
    LinkTable::new("test", FEATURES_INDEX, osm_links().pairs().to_vec())
}

/// Links whose identity has no level names at all.
pub fn unnamed_links() -> LinkTable {
    LinkTable::with_levels([None, None], osm_links().pairs().to_vec())
}

/// Links declaring a third identity level.
pub fn three_level_links() -> LinkTable {
    LinkTable::with_levels(
        [
            Some(REGIONS_INDEX.to_owned()),
            Some(FEATURES_INDEX.to_owned()),
            Some("source".to_owned()),
        ],
        osm_links().pairs().to_vec(),
    )
}

// ── Bundles ────────────────────────────────────────────────────────

pub fn osm_tables() -> Tables {
    Tables {
        regions: h3_regions(),
        features: osm_features(),
        links: osm_links(),
    }
}

pub fn int_tables() -> Tables {
    Tables {
        regions: int_regions(),
        features: int_features(),
        links: int_links(),
    }
}

pub fn boolean_tables() -> Tables {
    Tables {
        regions: h3_regions(),
        features: boolean_features(),
        links: boolean_links(),
    }
}

pub fn empty_feature_tables() -> Tables {
    Tables {
        regions: h3_regions(),
        features: empty_features(),
        links: empty_links(),
    }
}
