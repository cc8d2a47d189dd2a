//! Benchmark profiles and synthetic inputs for the Census aggregation
//! framework.
//!
//! - [`reference_profile`]: 1K regions, 10K features, 20K links
//! - [`stress_profile`]: 10K regions, 100K features, 200K links
//! - [`synthetic_tables`]: deterministic tables for a profile via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use census_core::{
    FeatureTable, Index, LinkTable, RegionTable, TagColumn, FEATURES_INDEX, REGIONS_INDEX,
};
use census_schema::{ExpectedFeatures, TagFilterValue};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Tag keys used by synthetic feature tables, in column order.
pub const TAG_KEYS: [&str; 4] = ["amenity", "leisure", "shop", "tourism"];

/// Shape of a synthetic aggregation input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Profile {
    /// Distinct region keys.
    pub regions: usize,
    /// Feature rows.
    pub features: usize,
    /// Link rows.
    pub links: usize,
    /// Distinct values per tag key.
    pub values_per_tag: usize,
    /// Probability that a tag cell is missing.
    pub null_rate: f64,
}

/// Build a reference benchmark profile: 1K regions, 10K features.
pub fn reference_profile() -> Profile {
    Profile {
        regions: 1_000,
        features: 10_000,
        links: 20_000,
        values_per_tag: 8,
        null_rate: 0.6,
    }
}

/// Build a stress benchmark profile at 10x the reference size.
pub fn stress_profile() -> Profile {
    Profile {
        regions: 10_000,
        features: 100_000,
        links: 200_000,
        values_per_tag: 32,
        null_rate: 0.6,
    }
}

/// Three input tables generated from a [`Profile`].
#[derive(Clone, Debug)]
pub struct SyntheticTables {
    /// `region_id`-indexed regions `r0..rN`.
    pub regions: RegionTable,
    /// `feature_id`-indexed features `f0..fN` tagged with [`TAG_KEYS`].
    pub features: FeatureTable,
    /// Uniformly random `(region, feature)` links.
    pub links: LinkTable,
}

fn below(rng: &mut ChaCha8Rng, n: usize) -> usize {
    (rng.next_u64() % n as u64) as usize
}

fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

/// Generate deterministic tables for `profile`.
///
/// The same `(profile, seed)` always yields the same tables.
pub fn synthetic_tables(profile: &Profile, seed: u64) -> SyntheticTables {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let values_per_tag = profile.values_per_tag.max(1);

    let regions = RegionTable::new(Index::new(
        REGIONS_INDEX,
        (0..profile.regions).map(|i| format!("r{i}")),
    ));

    let mut features = FeatureTable::new(Index::new(
        FEATURES_INDEX,
        (0..profile.features).map(|i| format!("f{i}")),
    ));
    for key in TAG_KEYS {
        let values: Vec<Option<String>> = (0..profile.features)
            .map(|_| {
                if unit(&mut rng) < profile.null_rate {
                    None
                } else {
                    Some(format!("v{}", below(&mut rng, values_per_tag)))
                }
            })
            .collect();
        features = match features.with_column(key, TagColumn::categorical(values)) {
            Ok(table) => table,
            Err(e) => unreachable!("synthetic columns match the index length: {e}"),
        };
    }

    let pairs: Vec<(String, String)> = if profile.regions == 0 || profile.features == 0 {
        Vec::new()
    } else {
        (0..profile.links)
            .map(|_| {
                let r = below(&mut rng, profile.regions);
                let f = below(&mut rng, profile.features);
                (format!("r{r}"), format!("f{f}"))
            })
            .collect()
    };
    let links = LinkTable::new(REGIONS_INDEX, FEATURES_INDEX, pairs);

    SyntheticTables {
        regions,
        features,
        links,
    }
}

/// Flat filter naming every value [`synthetic_tables`] can produce for
/// `profile`, plus one value it never produces per key.
pub fn synthetic_filter(profile: &Profile) -> ExpectedFeatures {
    let values: Vec<String> = (0..=profile.values_per_tag.max(1))
        .map(|v| format!("v{v}"))
        .collect();
    ExpectedFeatures::flat(
        TAG_KEYS
            .iter()
            .map(|key| (*key, TagFilterValue::values(values.iter().cloned()))),
    )
}
