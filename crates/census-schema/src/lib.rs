//! Expected output schemas for Census aggregations.
//!
//! Callers that need a stable column layout across many independent
//! aggregation calls (e.g. fixed-width model inputs) describe the
//! columns they expect with [`ExpectedFeatures`]. The description is
//! compiled once into an [`ExpectedSchema`], which the aggregator then
//! reconciles every result against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod expected;
pub mod naming;
pub mod spec;

pub use expected::ExpectedSchema;
pub use spec::{collect_filter, ExpectedFeatures, GroupedTagFilter, TagFilter, TagFilterValue};
