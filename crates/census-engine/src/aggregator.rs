//! The count aggregator: regions × links × features → [`Embedding`].

use std::time::{Duration, Instant};

use census_core::{AggregateError, FeatureTable, InputError, LinkTable, RegionTable};
use census_schema::{ExpectedFeatures, ExpectedSchema};
use tracing::{debug, warn};

use crate::config::AggregatorConfig;
use crate::counts::count_by_region;
use crate::embedding::Embedding;
use crate::encode::{all_boolean, encode_features, Encoding};
use crate::metrics::AggregateMetrics;
use crate::reconcile::reconcile;
use crate::validate::validate_tables;

/// An embedding together with the metrics of the call that built it.
#[derive(Clone, Debug)]
pub struct AggregateResult {
    /// Per-region counts.
    pub embedding: Embedding,
    /// Sizes and timing of the call.
    pub metrics: AggregateMetrics,
}

/// Counts, per region, the features linked to it.
///
/// The expected schema is compiled once at construction; afterwards the
/// aggregator is immutable and every call is independent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountAggregator {
    count_subcategories: bool,
    expected: Option<ExpectedSchema>,
}

impl Default for CountAggregator {
    /// Subcategory counting, no expected schema.
    fn default() -> Self {
        Self {
            count_subcategories: true,
            expected: None,
        }
    }
}

impl CountAggregator {
    /// Build an aggregator, compiling the configured expected features.
    pub fn new(config: &AggregatorConfig) -> Result<Self, InputError> {
        Ok(Self {
            count_subcategories: config.count_subcategories,
            expected: config.expected_schema()?,
        })
    }

    /// Shorthand for [`new`](Self::new) without a config value.
    pub fn with_expected_features(
        expected_features: Option<ExpectedFeatures>,
        count_subcategories: bool,
    ) -> Result<Self, InputError> {
        Self::new(&AggregatorConfig {
            count_subcategories,
            expected_features,
        })
    }

    /// Whether every tag value is counted separately.
    pub fn count_subcategories(&self) -> bool {
        self.count_subcategories
    }

    /// The compiled expected schema, if any.
    pub fn expected_schema(&self) -> Option<&ExpectedSchema> {
        self.expected.as_ref()
    }

    /// Count features per region.
    ///
    /// Every distinct region key gets a row, zero-filled when nothing is
    /// linked to it. Fails on malformed identities, on an empty feature
    /// table without an expected schema, and on all-boolean tag columns
    /// under subcategory counting.
    pub fn aggregate(
        &self,
        regions: &RegionTable,
        features: &FeatureTable,
        links: &LinkTable,
    ) -> Result<Embedding, AggregateError> {
        self.aggregate_with_metrics(regions, features, links)
            .map(|result| result.embedding)
    }

    /// [`aggregate`](Self::aggregate), also returning [`AggregateMetrics`].
    pub fn aggregate_with_metrics(
        &self,
        regions: &RegionTable,
        features: &FeatureTable,
        links: &LinkTable,
    ) -> Result<AggregateResult, AggregateError> {
        let start = Instant::now();
        let identity = validate_tables(regions, features, links)?;

        let mut metrics = AggregateMetrics {
            regions: regions.len(),
            features: features.len(),
            links: links.len(),
            ..AggregateMetrics::default()
        };

        if features.is_empty() {
            let schema = self
                .expected
                .as_ref()
                .ok_or(InputError::EmptyFeaturesWithoutSchema)?;
            debug!(
                regions = regions.len(),
                columns = schema.len(),
                "no features; zero-filling expected schema"
            );
            let embedding = Embedding::zeros(identity.region, regions, schema.columns().to_vec());
            metrics.filled_columns = schema.len();
            metrics.output_columns = schema.len();
            metrics.total_us = saturating_us(start.elapsed());
            return Ok(AggregateResult { embedding, metrics });
        }

        let encoding = Encoding::select(self.count_subcategories, all_boolean(features))?;
        debug!(?encoding, features = features.len(), "encoding feature tags");
        let indicators = encode_features(features, encoding);

        let joined = count_by_region(links, features, &indicators);
        if joined.unmatched_links > 0 {
            warn!(
                unmatched = joined.unmatched_links,
                links = links.len(),
                feature_index = identity.feature,
                "links reference features absent from the feature table"
            );
        }

        let (counts, stats) = reconcile(joined.counts, self.expected.as_ref());
        let embedding = Embedding::from_counts(identity.region, regions, counts);

        metrics.encoding = Some(encoding);
        metrics.indicator_columns = indicators.width();
        metrics.filled_columns = stats.filled;
        metrics.dropped_columns = stats.dropped;
        metrics.unmatched_links = joined.unmatched_links;
        metrics.output_columns = embedding.columns().len();
        metrics.total_us = saturating_us(start.elapsed());
        Ok(AggregateResult { embedding, metrics })
    }
}

/// Whole microseconds in `elapsed`, saturating at `u64::MAX`.
fn saturating_us(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}
