use std::collections::BTreeSet;

use avl_tree::{AvlTree, NOT_FOUND};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i32> {
    -2_000i32..2_000i32
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i32),
    Delete(i32),
    Contains(i32),
    First,
    Last,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => value_strategy().prop_map(TreeOp::Insert),
        3 => value_strategy().prop_map(TreeOp::Delete),
        2 => value_strategy().prop_map(TreeOp::Contains),
        1 => Just(TreeOp::First),
        1 => Just(TreeOp::Last),
    ]
}

/// Largest height an AVL tree with `len` nodes can have.
fn height_bound(len: usize) -> u32 {
    (0..).find(|&height| AvlTree::min_nodes(height + 1) > len).unwrap()
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both AvlTree and BTreeSet and
    /// asserts identical results at every step.
    #[test]
    fn tree_ops_match_btreeset(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree = AvlTree::new();
        let mut model: BTreeSet<i32> = BTreeSet::new();

        for op in &ops {
            match op {
                TreeOp::Insert(v) => {
                    let before = tree.rebalance_count();
                    prop_assert_eq!(tree.insert(*v), model.insert(*v), "insert({})", v);
                    prop_assert!(tree.rebalance_count() - before <= 1, "insert({}) rebalanced twice", v);
                }
                TreeOp::Delete(v) => {
                    prop_assert_eq!(tree.delete(*v), model.remove(v), "delete({})", v);
                }
                TreeOp::Contains(v) => {
                    let depth = tree.contains(*v);
                    if model.contains(v) {
                        prop_assert!(depth >= 0, "contains({})", v);
                        prop_assert!(depth.unsigned_abs() <= tree.height().unwrap(), "contains({})", v);
                    } else {
                        prop_assert_eq!(depth, NOT_FOUND, "contains({})", v);
                    }
                }
                TreeOp::First => {
                    prop_assert_eq!(tree.first(), model.first().copied());
                }
                TreeOp::Last => {
                    prop_assert_eq!(tree.last(), model.last().copied());
                }
            }
            prop_assert_eq!(tree.size(), model.len());
        }

        prop_assert_eq!(tree.check_invariants(), Ok(()));
        prop_assert!(tree.iter().eq(model.iter().copied()));
    }

    /// Checks every invariant after every single mutation.
    #[test]
    fn invariants_hold_after_each_mutation(ops in proptest::collection::vec((any::<bool>(), -200i32..200), 0..600)) {
        let mut tree = AvlTree::new();
        for (insert, value) in ops {
            if insert {
                tree.insert(value);
            } else {
                tree.delete(value);
            }
            prop_assert_eq!(tree.check_invariants(), Ok(()));
            if let Some(height) = tree.height() {
                prop_assert!(height <= height_bound(tree.size()));
                prop_assert!(tree.size() <= AvlTree::max_nodes(height));
            }
        }
    }

    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let tree: AvlTree = values.iter().copied().collect();
        let model: BTreeSet<i32> = values.iter().copied().collect();

        let mut iter = tree.iter();
        prop_assert_eq!(iter.len(), model.len());
        for expected in &model {
            prop_assert_eq!(iter.peek(), Some(*expected));
            prop_assert_eq!(iter.next(), Some(*expected));
        }
        prop_assert_eq!(iter.next(), None);
        prop_assert_eq!(iter.next(), None);

        prop_assert!(tree.into_iter().eq(model.into_iter()));
    }

    #[test]
    fn clear_empties_tree(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let mut tree: AvlTree = values.iter().copied().collect();
        tree.clear();
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.height(), None);
        prop_assert_eq!(tree.iter().next(), None);
    }
}

// ─── Trait implementations ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn extend_matches_btreeset(
        first in proptest::collection::vec(value_strategy(), TEST_SIZE),
        second in proptest::collection::vec(value_strategy(), TEST_SIZE),
    ) {
        let mut tree: AvlTree = first.iter().copied().collect();
        let mut model: BTreeSet<i32> = first.iter().copied().collect();
        tree.extend(&second);
        model.extend(&second);
        prop_assert!(tree.iter().eq(model.iter().copied()));
        prop_assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn clone_produces_independent_tree(values in proptest::collection::vec(value_strategy(), 1..TEST_SIZE)) {
        let original: AvlTree = values.iter().copied().collect();
        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);

        let victim = values[0];
        prop_assert!(copy.delete(victim));
        prop_assert!(copy != original);
        prop_assert!(original.contains(victim) >= 0);
        prop_assert_eq!(copy.contains(victim), NOT_FOUND);
        prop_assert_eq!(original.check_invariants(), Ok(()));
        prop_assert_eq!(copy.check_invariants(), Ok(()));
    }

    #[test]
    fn eq_ignores_insertion_order(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let forward: AvlTree = values.iter().copied().collect();
        let backward: AvlTree = values.iter().rev().copied().collect();
        prop_assert_eq!(forward, backward);
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn example_keys_round_trip() {
    let mut tree = AvlTree::from([5, 3, 8, 1, 4, 7, 9, 2, 6]);
    assert_eq!(tree.iter().collect::<Vec<_>>(), (1..=9).collect::<Vec<_>>());

    assert!(tree.delete(5));
    assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 2, 3, 4, 6, 7, 8, 9]);
    assert_eq!(tree.contains(5), NOT_FOUND);
    assert_eq!(tree.size(), 8);
    assert_eq!(tree.check_invariants(), Ok(()));
}

#[test]
fn capacity_formulas() {
    assert_eq!([0, 1, 2].map(AvlTree::min_nodes), [1, 2, 4]);
    assert_eq!([0, 1, 2].map(AvlTree::max_nodes), [1, 3, 7]);
}

#[test]
fn ascending_and_descending_runs_are_balanced() {
    let ascending: AvlTree = (0..4_095).collect();
    let descending: AvlTree = (0..4_095).rev().collect();
    assert_eq!(ascending.height(), Some(11));
    assert_eq!(descending.height(), Some(11));
    assert_eq!(ascending, descending);
}

#[test]
fn draining_in_any_direction_keeps_balance() {
    let mut tree: AvlTree = (0..512).collect();
    for (low, high) in (0..256).zip((256..512).rev()) {
        assert!(tree.delete(low));
        assert!(tree.delete(high));
        assert_eq!(tree.check_invariants(), Ok(()));
    }
    assert!(tree.is_empty());
}

#[test]
fn empty_source_builds_empty_tree() {
    assert_eq!(AvlTree::from(&[][..]), AvlTree::default());
    assert_eq!(std::iter::empty().collect::<AvlTree>().size(), 0);
}

#[test]
fn debug_output() {
    assert_eq!(format!("{:?}", AvlTree::from([2, -1, 7])), "{-1, 2, 7}");
    assert_eq!(format!("{:?}", AvlTree::new()), "{}");
}
