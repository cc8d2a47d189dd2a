//! Count aggregation over region, feature and link tables.
//!
//! Provides [`CountAggregator`], which validates the three input tables,
//! encodes feature tags as indicator columns, sums them per linked region
//! and reconciles the result with an optional expected schema. The
//! output is an [`Embedding`] with one `i32` count vector per region.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregator;
pub mod config;
pub mod counts;
pub mod embedding;
pub mod encode;
pub mod metrics;
pub mod reconcile;
pub mod validate;

pub use aggregator::{AggregateResult, CountAggregator};
pub use config::{AggregatorConfig, ConfigError};
pub use counts::{count_by_region, JoinedCounts, RegionCounts};
pub use embedding::Embedding;
pub use encode::{all_boolean, encode_features, Encoding, IndicatorTable};
pub use metrics::AggregateMetrics;
pub use reconcile::{reconcile, ReconcileStats};
pub use validate::{validate_tables, TableIdentity};
