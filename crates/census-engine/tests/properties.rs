//! Property tests: region totality, schema determinism, count
//! conservation, zero-fill and idempotence over random tables, with
//! categorical, boolean and mixed tag columns.

use census_core::{
    FeatureTable, Index, Key, LinkTable, RegionTable, TagColumn, FEATURES_INDEX, REGIONS_INDEX,
};
use census_engine::CountAggregator;
use census_schema::ExpectedFeatures;
use proptest::prelude::*;

const TAGS: [&str; 2] = ["amenity", "leisure"];
const FLAGS: [&str; 2] = ["open", "wheelchair"];

/// Random tables: region keys may repeat, every feature has both tags,
/// links stay within the region table but may point at unknown features.
#[derive(Clone, Debug)]
struct Input {
    regions: Vec<String>,
    tags: Vec<[Option<String>; 2]>,
    links: Vec<(usize, usize)>,
}

impl Input {
    fn region_table(&self) -> RegionTable {
        RegionTable::new(Index::new(REGIONS_INDEX, self.regions.iter().cloned()))
    }

    fn feature_key(i: usize) -> String {
        format!("f{i}")
    }

    fn feature_table(&self) -> FeatureTable {
        let index = Index::new(FEATURES_INDEX, (0..self.tags.len()).map(Self::feature_key));
        FeatureTable::from_columns(
            index,
            TAGS.iter().enumerate().map(|(t, name)| {
                let values = self.tags.iter().map(|row| row[t].clone());
                (*name, TagColumn::categorical(values))
            }),
        )
        .unwrap()
    }

    fn link_table(&self) -> LinkTable {
        LinkTable::new(
            REGIONS_INDEX,
            FEATURES_INDEX,
            self.links
                .iter()
                .map(|&(r, f)| (self.regions[r].clone(), Self::feature_key(f))),
        )
    }

    /// Brute-force count of links from `region` to features where tag
    /// `t` satisfies `pred`.
    fn count(&self, region: &str, t: usize, pred: impl Fn(Option<&str>) -> bool) -> i32 {
        self.links
            .iter()
            .filter(|&&(r, _)| self.regions[r] == region)
            .filter_map(|&(_, f)| self.tags.get(f))
            .filter(|row| pred(row[t].as_deref()))
            .count() as i32
    }
}

/// Random tables with one categorical `shop` column and two boolean flag
/// columns per feature. Links follow the same rules as [`Input`].
#[derive(Clone, Debug)]
struct FlagInput {
    regions: Vec<String>,
    shop: Vec<Option<String>>,
    flags: Vec<[bool; 2]>,
    links: Vec<(usize, usize)>,
}

impl FlagInput {
    fn region_table(&self) -> RegionTable {
        RegionTable::new(Index::new(REGIONS_INDEX, self.regions.iter().cloned()))
    }

    /// Flag columns only, so every tag column is boolean.
    fn flag_table(&self) -> FeatureTable {
        let index = Index::new(FEATURES_INDEX, (0..self.flags.len()).map(Input::feature_key));
        FeatureTable::from_columns(index, self.flag_columns()).unwrap()
    }

    /// `shop` followed by the flag columns.
    fn mixed_table(&self) -> FeatureTable {
        let index = Index::new(FEATURES_INDEX, (0..self.flags.len()).map(Input::feature_key));
        let shop = ("shop", TagColumn::categorical(self.shop.iter().cloned()));
        FeatureTable::from_columns(index, std::iter::once(shop).chain(self.flag_columns()))
            .unwrap()
    }

    fn flag_columns(&self) -> impl Iterator<Item = (&'static str, TagColumn)> + '_ {
        FLAGS.iter().enumerate().map(move |(t, name)| {
            let values = self.flags.iter().map(|row| row[t]);
            (*name, TagColumn::boolean(values))
        })
    }

    fn link_table(&self) -> LinkTable {
        LinkTable::new(
            REGIONS_INDEX,
            FEATURES_INDEX,
            self.links
                .iter()
                .map(|&(r, f)| (self.regions[r].clone(), Input::feature_key(f))),
        )
    }

    /// Brute-force count of links from `region` to known features whose
    /// row index satisfies `pred`.
    fn count(&self, region: &str, pred: impl Fn(usize) -> bool) -> i32 {
        self.links
            .iter()
            .filter(|&&(r, f)| self.regions[r] == region && f < self.flags.len())
            .filter(|&&(_, f)| pred(f))
            .count() as i32
    }
}

fn arb_tag() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-c]")
}

fn arb_input() -> impl Strategy<Value = Input> {
    (
        prop::collection::vec("r[0-5]", 0..8),
        prop::collection::vec([arb_tag(), arb_tag()], 1..10),
    )
        .prop_flat_map(|(regions, tags)| {
            let link = if regions.is_empty() {
                Just(Vec::new()).boxed()
            } else {
                prop::collection::vec((0..regions.len(), 0..tags.len() + 2), 0..20).boxed()
            };
            (Just(regions), Just(tags), link)
        })
        .prop_map(|(regions, tags, links)| Input {
            regions,
            tags,
            links,
        })
}

fn arb_flag_input() -> impl Strategy<Value = FlagInput> {
    (
        prop::collection::vec("r[0-5]", 0..8),
        prop::collection::vec((arb_tag(), any::<[bool; 2]>()), 1..10),
    )
        .prop_flat_map(|(regions, rows)| {
            let link = if regions.is_empty() {
                Just(Vec::new()).boxed()
            } else {
                prop::collection::vec((0..regions.len(), 0..rows.len() + 2), 0..20).boxed()
            };
            (Just(regions), Just(rows), link)
        })
        .prop_map(|(regions, rows, links)| {
            let (shop, flags) = rows.into_iter().unzip();
            FlagInput {
                regions,
                shop,
                flags,
                links,
            }
        })
}

fn distinct(keys: &[String]) -> Vec<Key> {
    let mut seen = Vec::new();
    for k in keys {
        let key = Key::from(k.as_str());
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}

proptest! {
    #[test]
    fn every_distinct_region_has_exactly_one_row(input in arb_input(), sub in any::<bool>()) {
        let agg = CountAggregator::with_expected_features(None, sub).unwrap();
        let e = agg
            .aggregate(&input.region_table(), &input.feature_table(), &input.link_table())
            .unwrap();
        let expected = distinct(&input.regions);
        let got: Vec<Key> = e.regions().cloned().collect();
        prop_assert_eq!(got, expected);
        prop_assert_eq!(e.values().len(), e.len() * e.columns().len());
    }

    #[test]
    fn expected_list_fixes_columns(
        input in arb_input(),
        names in prop::collection::vec("(amenity|leisure|shop)(_[a-d])?", 1..6),
        sub in any::<bool>(),
    ) {
        let agg = CountAggregator::with_expected_features(
            Some(ExpectedFeatures::list(names.clone())),
            sub,
        )
        .unwrap();
        let e = agg
            .aggregate(&input.region_table(), &input.feature_table(), &input.link_table())
            .unwrap();
        prop_assert_eq!(e.columns(), names.as_slice());
    }

    #[test]
    fn one_hot_counts_match_linked_features(input in arb_input()) {
        let e = CountAggregator::default()
            .aggregate(&input.region_table(), &input.feature_table(), &input.link_table())
            .unwrap();
        for region in distinct(&input.regions) {
            let name = region.to_string();
            for (t, tag) in TAGS.iter().enumerate() {
                for value in ["a", "b", "c"] {
                    let want = input.count(&name, t, |v| v == Some(value));
                    let column = format!("{tag}_{value}");
                    let got = e.get(&region, &column).unwrap_or(0);
                    prop_assert_eq!(got, want, "{} {}", name, column);
                }
            }
        }
    }

    #[test]
    fn presence_counts_match_linked_features(input in arb_input()) {
        let agg = CountAggregator::with_expected_features(None, false).unwrap();
        let e = agg
            .aggregate(&input.region_table(), &input.feature_table(), &input.link_table())
            .unwrap();
        prop_assert_eq!(e.columns(), TAGS);
        for region in distinct(&input.regions) {
            let name = region.to_string();
            for (t, tag) in TAGS.iter().enumerate() {
                let want = input.count(&name, t, |v| v.is_some());
                prop_assert_eq!(e.get(&region, tag), Some(want));
            }
        }
    }

    #[test]
    fn empty_features_zero_fill_expected_columns(
        regions in prop::collection::vec("r[0-9]", 0..8),
        names in prop::collection::vec("[a-z]{1,6}", 1..5),
    ) {
        let agg = CountAggregator::with_expected_features(
            Some(ExpectedFeatures::list(names.clone())),
            true,
        )
        .unwrap();
        let region_table = RegionTable::new(Index::new(REGIONS_INDEX, regions.iter().cloned()));
        let features = FeatureTable::new(Index::new(FEATURES_INDEX, Vec::<Key>::new()));
        let links = LinkTable::new(REGIONS_INDEX, FEATURES_INDEX, Vec::<(Key, Key)>::new());
        let e = agg.aggregate(&region_table, &features, &links).unwrap();
        prop_assert_eq!(e.len(), distinct(&regions).len());
        prop_assert_eq!(e.columns(), names.as_slice());
        prop_assert!(e.values().iter().all(|&v| v == 0));
    }

    #[test]
    fn aggregation_is_idempotent(input in arb_input(), sub in any::<bool>()) {
        let agg = CountAggregator::with_expected_features(None, sub).unwrap();
        let regions = input.region_table();
        let features = input.feature_table();
        let links = input.link_table();
        let first = agg.aggregate(&regions, &features, &links).unwrap();
        let second = agg.aggregate(&regions, &features, &links).unwrap();
        prop_assert_eq!(first.sorted_by_region(), second.sorted_by_region());
    }

    #[test]
    fn flag_counts_match_linked_true_flags(input in arb_flag_input()) {
        let agg = CountAggregator::with_expected_features(None, false).unwrap();
        let e = agg
            .aggregate(&input.region_table(), &input.flag_table(), &input.link_table())
            .unwrap();
        prop_assert_eq!(e.columns(), FLAGS);
        for region in distinct(&input.regions) {
            let name = region.to_string();
            for (t, flag) in FLAGS.iter().enumerate() {
                let want = input.count(&name, |f| input.flags[f][t]);
                prop_assert_eq!(e.get(&region, flag), Some(want), "{} {}", name, flag);
            }
        }
    }

    #[test]
    fn flag_tables_reject_subcategories(input in arb_flag_input()) {
        let result = CountAggregator::default()
            .aggregate(&input.region_table(), &input.flag_table(), &input.link_table());
        prop_assert!(result.is_err());
    }

    #[test]
    fn mixed_one_hot_expands_flags_to_true_and_false(input in arb_flag_input()) {
        let e = CountAggregator::default()
            .aggregate(&input.region_table(), &input.mixed_table(), &input.link_table())
            .unwrap();
        for region in distinct(&input.regions) {
            let name = region.to_string();
            for value in ["a", "b", "c"] {
                let want = input.count(&name, |f| input.shop[f].as_deref() == Some(value));
                let column = format!("shop_{value}");
                prop_assert_eq!(e.get(&region, &column).unwrap_or(0), want, "{} {}", name, column);
            }
            for (t, flag) in FLAGS.iter().enumerate() {
                for state in [true, false] {
                    let want = input.count(&name, |f| input.flags[f][t] == state);
                    let column = format!("{flag}_{state}");
                    prop_assert_eq!(e.get(&region, &column).unwrap_or(0), want, "{} {}", name, column);
                }
            }
        }
    }

    #[test]
    fn mixed_presence_counts_flags_as_present(input in arb_flag_input()) {
        let agg = CountAggregator::with_expected_features(None, false).unwrap();
        let e = agg
            .aggregate(&input.region_table(), &input.mixed_table(), &input.link_table())
            .unwrap();
        prop_assert_eq!(e.columns(), ["shop", "open", "wheelchair"]);
        for region in distinct(&input.regions) {
            let name = region.to_string();
            let shops = input.count(&name, |f| input.shop[f].is_some());
            let linked = input.count(&name, |_| true);
            prop_assert_eq!(e.get(&region, "shop"), Some(shops));
            for flag in FLAGS {
                prop_assert_eq!(e.get(&region, flag), Some(linked));
            }
        }
    }
}
