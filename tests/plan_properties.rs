//! Properties of the randomized trial plan.

use std::collections::HashMap;

use overhead_oracle::{build_plan, BucketKey, TrialParameter};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn axis() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::btree_set(1u64..10_000, 1..5).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn grid_is_complete(
        work_units in axis(),
        repetitions in axis(),
        trials in 0usize..20,
        seed in any::<u64>(),
    ) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let plan = build_plan(&work_units, &repetitions, trials, &mut rng);
        prop_assert_eq!(plan.len(), work_units.len() * repetitions.len() * trials * 2);

        let mut counts: HashMap<BucketKey, usize> = HashMap::new();
        for tp in plan.trials() {
            *counts.entry(tp.bucket()).or_default() += 1;
        }
        for key in plan.buckets() {
            prop_assert_eq!(counts.get(&key).copied().unwrap_or(0), trials);
        }
        prop_assert_eq!(plan.buckets().count(), work_units.len() * repetitions.len() * 2);
    }

    #[test]
    fn shuffle_is_a_permutation(trials in 1usize..50, seed in any::<u64>()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let plan = build_plan(&[1, 2, 3], &[10], trials, &mut rng);

        let mut shuffled = plan.trials().to_vec();
        shuffled.sort_by_key(|t| t.bucket());
        let mut expected: Vec<TrialParameter> = [1, 2, 3]
            .iter()
            .flat_map(|&w| {
                (0..trials).flat_map(move |_| {
                    [TrialParameter::new(w, 10, true), TrialParameter::new(w, 10, false)]
                })
            })
            .collect();
        expected.sort_by_key(|t| t.bucket());
        prop_assert_eq!(shuffled, expected);
    }
}

/// Four distinct trials have 24 orderings; each should be about equally likely.
#[test]
fn all_orderings_equally_likely() {
    const RUNS: usize = 24_000;
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed);
    let mut orderings: HashMap<Vec<BucketKey>, usize> = HashMap::new();
    let mut first_position: HashMap<BucketKey, usize> = HashMap::new();

    for _ in 0..RUNS {
        let plan = build_plan(&[1, 2], &[1], 1, &mut rng);
        let order: Vec<BucketKey> = plan.trials().iter().map(|t| t.bucket()).collect();
        *first_position.entry(order[0]).or_default() += 1;
        *orderings.entry(order).or_default() += 1;
    }

    // Expected 1000 each, sd about 31.
    assert_eq!(orderings.len(), 24);
    for (order, count) in &orderings {
        assert!((850..=1150).contains(count), "{order:?} appeared {count} times");
    }

    // Expected 6000 each, sd about 67.
    assert_eq!(first_position.len(), 4);
    for (key, count) in &first_position {
        assert!((5650..=6350).contains(count), "{key} first {count} times");
    }
}
