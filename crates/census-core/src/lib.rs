//! Core types for the Census aggregation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Census workspace:
//! region and feature keys, the three input tables, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod table;

pub use error::{AggregateError, InputError, SchemaError};
pub use id::{Key, TableKind, FEATURES_INDEX, GEOMETRY_COLUMN, REGIONS_INDEX};
pub use table::{FeatureTable, Index, LinkTable, RegionTable, TagColumn};
