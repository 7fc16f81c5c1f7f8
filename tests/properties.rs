//! Property-based checks of the table laws.

use std::cmp::Ordering;
use std::collections::HashSet;

use colframe::aggregation::count;
use colframe::{Comparator, Config, Data, Filter, Order, Table};
use proptest::prelude::*;

/// Columns usable as sort, group and distinct keys, one per variant
/// plus both kinds of categorical dictionary.
const KEYS: [&str; 6] = ["key", "tag", "level", "cat", "flag", "score"];

const LEVELS: [&str; 3] = ["low", "mid", "high"];

/// Strategy for a table with low-cardinality keys of every variant, nulls
/// in the float, text and categorical columns, and a null-free int value.
fn table_strategy() -> impl Strategy<Value = Table> {
    (0usize..40).prop_flat_map(|n| {
        (
            proptest::collection::vec(0i64..4, n),
            proptest::collection::vec(proptest::option::of(proptest::sample::select(vec!["b", "a", "c"])), n),
            proptest::collection::vec(proptest::option::of(proptest::sample::select(LEVELS.to_vec())), n),
            proptest::collection::vec(proptest::option::of(proptest::sample::select(vec!["x", "y", "z"])), n),
            proptest::collection::vec(any::<bool>(), n),
            proptest::collection::vec(-50i64..50, n),
            proptest::collection::vec(proptest::option::of((-4i32..4).prop_map(f64::from)), n),
        )
            .prop_map(|(keys, tags, levels, cats, flags, vals, scores)| {
                let scores: Vec<f64> = scores.into_iter().map(|s| s.unwrap_or(f64::NAN)).collect();
                Table::new(
                    [
                        ("key", Data::from(keys)),
                        ("tag", Data::from(tags)),
                        ("level", Data::from(levels)),
                        ("cat", Data::from(cats)),
                        ("flag", Data::from(flags)),
                        ("val", Data::from(vals)),
                        ("score", Data::from(scores)),
                    ],
                    Config::new()
                        .enum_column("level", &LEVELS)
                        .inferred_enum_column("cat"),
                )
            })
    })
}

fn keys_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(KEYS.to_vec(), 1..=3)
}

fn orders_strategy() -> impl Strategy<Value = Vec<Order>> {
    (keys_strategy(), proptest::collection::vec(any::<bool>(), 3)).prop_map(|(keys, reverse)| {
        keys.into_iter()
            .zip(reverse)
            .map(|(k, r)| if r { Order::desc(k) } else { Order::asc(k) })
            .collect()
    })
}

fn comparator_strategy() -> impl Strategy<Value = Comparator> {
    prop_oneof![
        Just(Comparator::Eq),
        Just(Comparator::Ne),
        Just(Comparator::Gt),
        Just(Comparator::Ge),
        Just(Comparator::Lt),
        Just(Comparator::Le),
    ]
}

/// Rendered key values of the row stored at `pos`.
fn row_key(table: &Table, keys: &[&str], pos: u32) -> Vec<String> {
    keys.iter()
        .map(|k| table.column(k).unwrap().render(pos as usize, "<null>"))
        .collect()
}

/// Ordering of two stored rows under `orders`.
fn compare(table: &Table, orders: &[Order], a: u32, b: u32) -> Ordering {
    orders
        .iter()
        .map(|o| {
            table
                .column(&o.column)
                .unwrap()
                .comparable(o.reverse, o.by_text)
                .compare(a as usize, b as usize)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: sorted rows are in order, and tied rows keep their
    /// relative order
    #[test]
    fn prop_sort_is_ordered_and_stable(table in table_strategy(), orders in orders_strategy()) {
        let sorted = table.sort(&orders);
        prop_assert!(sorted.is_ok());
        let positions = sorted.row_positions();
        for pair in positions.windows(2) {
            match compare(&table, &orders, pair[0], pair[1]) {
                Ordering::Greater => {
                    prop_assert!(false, "rows {:?} out of order", pair);
                }
                Ordering::Equal => {
                    prop_assert!(pair[0] < pair[1]);
                }
                Ordering::Less => {}
            }
        }
    }

    /// Property: sorting twice by the same keys yields the same order
    #[test]
    fn prop_sort_twice_is_deterministic(table in table_strategy(), orders in orders_strategy()) {
        let once = table.sort(&orders);
        let twice = once.sort(&orders);
        prop_assert_eq!(once.row_positions(), twice.row_positions());
        let again = table.sort(&orders);
        prop_assert_eq!(once.row_positions(), again.row_positions());
    }

    /// Property: refining a sort on `[A]` to `[A, B]` only reorders rows
    /// tied on `A`
    #[test]
    fn prop_sort_refinement_keeps_ties_in_place(
        table in table_strategy(),
        keys in proptest::sample::subsequence(KEYS.to_vec(), 2),
    ) {
        let first = table.sort(&[Order::asc(keys[0])]);
        let refined = first.sort(&[Order::asc(keys[0]), Order::asc(keys[1])]);

        let a_of = |t: &Table| -> Vec<String> {
            t.row_positions().iter().map(|&p| row_key(&table, &keys[..1], p).remove(0)).collect()
        };
        prop_assert_eq!(a_of(&first), a_of(&refined));

        let mut before = first.row_positions().to_vec();
        let mut after = refined.row_positions().to_vec();
        before.sort_unstable();
        after.sort_unstable();
        prop_assert_eq!(before, after);
    }

    /// Property: applying the same filter twice changes nothing
    #[test]
    fn prop_filter_is_idempotent(
        table in table_strategy(),
        comparator in comparator_strategy(),
        arg in -4.0f64..4.0,
    ) {
        let filter = [Filter::new("score", comparator, arg)];
        let once = table.filter(&filter);
        let twice = once.filter(&filter);
        prop_assert!(once.equals(&twice));
    }

    /// Property: on a column without nulls, a filter and its inverse split
    /// the rows without overlap
    #[test]
    fn prop_inverse_partitions_rows(
        table in table_strategy(),
        comparator in comparator_strategy(),
        arg in -50i64..50,
    ) {
        let kept = table.filter(&[Filter::new("val", comparator, arg)]);
        let dropped = table.filter(&[Filter::new("val", comparator, arg).inverted()]);
        let mut all: Vec<u32> = kept
            .row_positions()
            .iter()
            .chain(dropped.row_positions())
            .copied()
            .collect();
        all.sort_unstable();
        prop_assert_eq!(all, table.row_positions().to_vec());
    }

    /// Property: an inverted filter selects the same rows as its built-in
    /// inverse comparator, nulls included
    #[test]
    fn prop_inverse_matches_builtin(
        table in table_strategy(),
        comparator in comparator_strategy(),
        arg in -4.0f64..4.0,
        level in proptest::sample::select(LEVELS.to_vec()),
    ) {
        let inverse = comparator.inverse().unwrap();

        let inverted = table.filter(&[Filter::new("score", comparator, arg).inverted()]);
        let builtin = table.filter(&[Filter::new("score", inverse, arg)]);
        prop_assert_eq!(inverted.row_positions(), builtin.row_positions());

        let inverted = table.filter(&[Filter::new("level", comparator, level).inverted()]);
        let builtin = table.filter(&[Filter::new("level", inverse, level)]);
        prop_assert!(inverted.is_ok());
        prop_assert_eq!(inverted.row_positions(), builtin.row_positions());
    }

    /// Property: group partitions cover every row exactly once, rows of one
    /// partition agree on the keys, and rows of different partitions differ
    #[test]
    fn prop_groups_partition_rows(table in table_strategy(), keys in keys_strategy()) {
        let grouper = table.group_by(keys.as_slice());
        prop_assert!(grouper.err().is_none());

        let mut covered: Vec<u32> = grouper
            .partitions()
            .iter()
            .flat_map(|p| p.as_slice().iter().copied())
            .collect();
        covered.sort_unstable();
        prop_assert_eq!(covered, table.row_positions().to_vec());

        let mut seen = HashSet::new();
        for partition in grouper.partitions() {
            let rows = partition.as_slice();
            let head = row_key(&table, &keys, rows[0]);
            for &row in &rows[1..] {
                prop_assert_eq!(&row_key(&table, &keys, row), &head);
            }
            prop_assert!(seen.insert(head), "two partitions share a key");
        }

        let counts = grouper.aggregate(&[count("val")]);
        let total: i64 = counts.view::<i64>("val").unwrap().iter().sum();
        prop_assert_eq!(total as usize, table.len());
    }

    /// Property: distinct is idempotent and leaves no two rows equal on
    /// the chosen columns
    #[test]
    fn prop_distinct_is_idempotent(table in table_strategy(), keys in keys_strategy()) {
        let once = table.distinct(keys.as_slice());
        let twice = once.distinct(keys.as_slice());
        prop_assert!(once.equals(&twice));

        let unique: HashSet<Vec<String>> = once
            .row_positions()
            .iter()
            .map(|&p| row_key(&table, &keys, p))
            .collect();
        prop_assert_eq!(unique.len(), once.len());

        let all: HashSet<Vec<String>> = table
            .row_positions()
            .iter()
            .map(|&p| row_key(&table, &keys, p))
            .collect();
        prop_assert_eq!(unique, all);
    }

    /// Property: equality is reflexive and symmetric
    #[test]
    fn prop_equality_laws(table in table_strategy(), start in 0usize..5) {
        prop_assert!(table.equals(&table));
        let end = table.len();
        let start = start.min(end);
        let sliced = table.slice(start, end);
        prop_assert_eq!(table.equals(&sliced), sliced.equals(&table));
    }
}
