//! Test utilities for Census development.
//!
//! Provides the canonical region, feature and link tables used across
//! the workspace tests, plus malformed variants for validation tests.
//! See [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::Tables;
