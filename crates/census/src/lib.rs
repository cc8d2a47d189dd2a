//! Census: per-region feature counting for geospatial embeddings.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Census sub-crates. For most users, adding `census` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use census::prelude::*;
//!
//! let regions = RegionTable::new(Index::new(
//!     REGIONS_INDEX,
//!     ["891e2040897ffff", "891e2040d4bffff"],
//! ));
//! let features = FeatureTable::from_columns(
//!     Index::new(FEATURES_INDEX, ["way/312457804", "way/1533817161"]),
//!     [
//!         ("leisure", TagColumn::categorical([Some("playground"), None])),
//!         ("amenity", TagColumn::categorical([None, Some("pub")])),
//!     ],
//! )
//! .unwrap();
//! let links = LinkTable::new(
//!     REGIONS_INDEX,
//!     FEATURES_INDEX,
//!     [
//!         ("891e2040d4bffff", "way/312457804"),
//!         ("891e2040897ffff", "way/1533817161"),
//!     ],
//! );
//!
//! let config = AggregatorConfig {
//!     count_subcategories: true,
//!     expected_features: Some(ExpectedFeatures::list(["amenity_pub", "shop_bakery"])),
//! };
//! let aggregator = CountAggregator::new(&config).unwrap();
//! let embedding = aggregator.aggregate(&regions, &features, &links).unwrap();
//!
//! assert_eq!(embedding.columns(), ["amenity_pub", "shop_bakery"]);
//! assert_eq!(embedding.row(&Key::from("891e2040897ffff")), Some(&[1, 0][..]));
//! assert_eq!(embedding.row(&Key::from("891e2040d4bffff")), Some(&[0, 0][..]));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `census-core` | Keys, input tables, error types |
//! | [`schema`] | `census-schema` | Expected-feature specifications and their compilation |
//! | [`engine`] | `census-engine` | Configuration, validation, encoding, the aggregator |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Keys, input tables, and error types (`census-core`).
///
/// Contains [`types::RegionTable`], [`types::FeatureTable`],
/// [`types::LinkTable`] and the [`types::AggregateError`] hierarchy.
pub use census_core as types;

/// Expected-feature specifications (`census-schema`).
///
/// Describe a target schema with [`schema::ExpectedFeatures`] and compile
/// it into an [`schema::ExpectedSchema`].
pub use census_schema as schema;

/// Count aggregation (`census-engine`).
///
/// [`engine::CountAggregator`] turns the three input tables into an
/// [`engine::Embedding`].
pub use census_engine as engine;

/// Common imports for typical Census usage.
///
/// ```rust
/// use census::prelude::*;
/// ```
pub mod prelude {
    // Tables and keys
    pub use census_core::{
        FeatureTable, Index, Key, LinkTable, RegionTable, TagColumn, FEATURES_INDEX,
        GEOMETRY_COLUMN, REGIONS_INDEX,
    };

    // Errors
    pub use census_core::{AggregateError, InputError, SchemaError};

    // Expected schemas
    pub use census_schema::{ExpectedFeatures, ExpectedSchema, TagFilterValue};

    // Engine
    pub use census_engine::{
        AggregateMetrics, AggregateResult, AggregatorConfig, ConfigError, CountAggregator,
        Embedding,
    };
}
