//! Compares tree queries against a linear scan over the same intervals.

use std::collections::HashSet;

use centered_interval_tree::{Interval, IntervalTree, Violation};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn linear_search<K: centered_interval_tree::Endpoint>(
    intervals: &[Interval<K>],
    point: K,
) -> HashSet<Interval<K>> {
    intervals
        .iter()
        .filter(|interval| interval.contains(point))
        .copied()
        .collect()
}

fn tree_search<K: centered_interval_tree::Endpoint>(
    tree: &IntervalTree<K>,
    point: K,
) -> HashSet<Interval<K>> {
    tree.search(point).into_iter().copied().collect()
}

fn arbitrary_interval(lo: i32, hi: i32) -> impl Strategy<Value = Interval<i32>> {
    (lo..=hi, lo..=hi).prop_map(|(a, b)| Interval::closed(a.min(b), a.max(b)))
}

fn arbitrary_float_interval() -> impl Strategy<Value = Interval<f64>> {
    (-1e6..1e6_f64, 0.0..1e4_f64).prop_map(|(lower, width)| Interval::closed(lower, lower + width))
}

proptest! {
    #[test]
    fn prop_matches_linear_scan(
        intervals in prop::collection::vec(arbitrary_interval(-100, 100), 0..64),
        points in prop::collection::vec(-120..=120_i32, 1..32),
    ) {
        let tree = IntervalTree::new(intervals.iter().copied()).unwrap();
        for point in points {
            prop_assert_eq!(tree_search(&tree, point), linear_search(&intervals, point));
            prop_assert_eq!(tree.contains_point(point), intervals.iter().any(|i| i.contains(point)));
        }
    }

    /// Small domains force many shared endpoints and ties at node centers.
    #[test]
    fn prop_matches_linear_scan_on_crowded_endpoints(
        intervals in prop::collection::vec(arbitrary_interval(0, 6), 0..48),
    ) {
        let tree = IntervalTree::new(intervals.iter().copied()).unwrap();
        for point in -1..=7 {
            prop_assert_eq!(tree_search(&tree, point), linear_search(&intervals, point));
        }
    }

    #[test]
    fn prop_matches_linear_scan_f64(
        intervals in prop::collection::vec(arbitrary_float_interval(), 0..64),
        points in prop::collection::vec(-1.1e6..1.1e6_f64, 1..32),
    ) {
        let tree = IntervalTree::new(intervals.iter().copied()).unwrap();

        // Endpoints are the interesting points for closed bounds.
        let endpoints = intervals
            .iter()
            .flat_map(|i| [i.lower().unwrap(), i.upper().unwrap()]);
        for point in points.into_iter().chain(endpoints) {
            prop_assert_eq!(tree_search(&tree, point), linear_search(&intervals, point));
        }
    }

    #[test]
    fn prop_duplicates_do_not_change_results(
        intervals in prop::collection::vec(arbitrary_interval(-50, 50), 0..32),
        repeats in 1..4_usize,
    ) {
        let unique: HashSet<_> = intervals.iter().copied().collect();
        let single = IntervalTree::new(unique.iter().copied()).unwrap();
        let repeated = IntervalTree::new(
            std::iter::repeat(intervals.iter().copied()).take(repeats).flatten(),
        )
        .unwrap();

        prop_assert_eq!(repeated.len(), unique.len());
        for point in -55..=55 {
            prop_assert_eq!(tree_search(&repeated, point), tree_search(&single, point));
        }
    }

    #[test]
    fn prop_one_invalid_interval_rejects_all(
        intervals in prop::collection::vec(arbitrary_interval(-50, 50), 0..32),
        position in any::<prop::sample::Index>(),
        bound in 0..4_u8,
    ) {
        let invalid = match bound {
            0 => Interval::at_least(0),
            1 => Interval::at_most(0),
            2 => Interval::open(0, 1),
            _ => Interval::closed_open(0, 1),
        };
        let mut input = intervals;
        let at = position.index(input.len() + 1);
        input.insert(at, invalid);

        let err = IntervalTree::new(input).unwrap_err();
        prop_assert!(matches!(err.violation, Violation::Unbounded | Violation::NotClosed));
    }
}

#[test]
fn randomized_workload_matches_linear_scan() {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);

    for _trial in 0..50 {
        let intervals: Vec<_> = (0..200)
            .map(|_| {
                let a = rng.gen_range(-1000..1000_i32);
                let b = rng.gen_range(-1000..1000_i32);
                Interval::closed(a.min(b), a.max(b))
            })
            .collect();
        let tree = IntervalTree::new(intervals.iter().copied()).unwrap();

        for _ in 0..100 {
            let point: i32 = rng.gen_range(-1200..1200);
            assert_eq!(
                tree_search(&tree, point),
                linear_search(&intervals, point),
                "mismatch at point {}",
                point
            );
        }
    }
}

#[test]
fn skewed_intervals_stay_correct() {
    // Many short intervals near zero and one far away: the bounding-extent
    // center lands far from most of them.
    let mut rng = StdRng::seed_from_u64(0xCAFEBABE);
    let mut intervals: Vec<_> = (0..500)
        .map(|_| {
            let lower: f64 = rng.gen_range(0.0..10.0);
            Interval::closed(lower, lower + rng.gen_range(0.0..0.5_f64))
        })
        .collect();
    intervals.push(Interval::closed(1e9, 1e9 + 1.0));

    let tree = IntervalTree::new(intervals.iter().copied()).unwrap();
    assert!(tree.depth() > 1);
    for _ in 0..1000 {
        let point: f64 = rng.gen_range(-1.0..11.0);
        assert_eq!(tree_search(&tree, point), linear_search(&intervals, point));
    }
    assert_eq!(tree.search(1e9 + 1.0).len(), 1);
}

#[test]
fn nested_input_set() {
    let count = 200;
    let mut intervals = Vec::new();
    for i in 0..count {
        for j in i..count {
            intervals.push(Interval::closed(i, j));
        }
    }

    let tree = IntervalTree::new(intervals.iter().copied()).unwrap();
    assert_eq!(tree.len(), intervals.len());

    // [i, j] contains p iff i <= p <= j.
    for p in 0..count {
        let expected = ((p + 1) * (count - p)) as usize;
        assert_eq!(tree.search(p).len(), expected);
    }
}
