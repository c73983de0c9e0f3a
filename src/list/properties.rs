// Property-based checks of the list laws.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::List;

/// Counts nodes by walking the chain, independent of the cached length.
fn reachable<T>(list: &List<T>) -> usize {
    let mut count = 0;
    let mut cursor = list.head.as_deref();
    while let Some(node) = cursor {
        count += 1;
        cursor = node.next.as_deref();
    }
    count
}

#[derive(Debug, Clone)]
enum Op {
    PushFront(i32),
    PushBack(i32),
    InsertAt(i32, usize),
    PopFront,
    PopBack,
    RemoveAt(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::PushFront),
        any::<i32>().prop_map(Op::PushBack),
        (any::<i32>(), 0..12usize).prop_map(|(value, position)| Op::InsertAt(value, position)),
        Just(Op::PopFront),
        Just(Op::PopBack),
        (0..12usize).prop_map(Op::RemoveAt),
    ]
}

proptest! {
    #[test]
    fn test_length_matches_reachable_nodes(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut list = List::new();
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::PushFront(value) => {
                    list.push_front(value);
                    model.insert(0, value);
                }
                Op::PushBack(value) => {
                    list.push_back(value);
                    model.push(value);
                }
                Op::InsertAt(value, position) => {
                    let result = list.insert_at(value, position);
                    prop_assert_eq!(result.is_ok(), position <= model.len());
                    if position <= model.len() {
                        model.insert(position, value);
                    }
                }
                Op::PopFront => {
                    let result = list.pop_front().ok();
                    let expected = if model.is_empty() { None } else { Some(model.remove(0)) };
                    prop_assert_eq!(result, expected);
                }
                Op::PopBack => {
                    prop_assert_eq!(list.pop_back().ok(), model.pop());
                }
                Op::RemoveAt(position) => {
                    let result = list.remove_at(position).ok();
                    let expected = (position < model.len()).then(|| model.remove(position));
                    prop_assert_eq!(result, expected);
                }
            }

            prop_assert_eq!(list.len(), reachable(&list));
            prop_assert_eq!(list.is_empty(), list.head.is_none());
        }

        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), model);
    }

    #[test]
    fn test_order_preserved(values in prop::collection::vec(any::<i64>(), 0..40)) {
        let list = List::from_sequence(values.clone());
        prop_assert_eq!(list.into_iter().collect::<Vec<_>>(), values);
    }

    #[test]
    fn test_out_of_range_positions(
        values in prop::collection::vec(any::<u8>(), 0..20),
        extra in 1..5usize,
    ) {
        let mut list = List::from_sequence(values.clone());
        let n = list.len();
        prop_assert!(list.insert_at(0, n + extra).is_err());
        prop_assert!(list.at(n).is_err());
        prop_assert!(list.remove_at(n).is_err());
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), values);
    }

    #[test]
    fn test_map_identity(values in prop::collection::vec(any::<i32>(), 0..40)) {
        let list = List::from_sequence(values);
        let copy = list.map(|value, _| *value);
        prop_assert_eq!(copy.len(), list.len());
        prop_assert_eq!(&copy, &list);
    }

    #[test]
    fn test_filter_every_consistency(
        values in prop::collection::vec(-50i32..50, 0..40),
        threshold in -50i32..50,
    ) {
        let list = List::from_sequence(values);
        let predicate = |value: &i32| *value >= threshold;
        let filtered = list.filter(predicate);
        prop_assert!(filtered.len() <= list.len());
        prop_assert_eq!(list.every(predicate), filtered.len() == list.len());
        prop_assert_eq!(list.some(predicate), !filtered.is_empty());
    }

    #[test]
    fn test_concat_length_law(
        a in prop::collection::vec(any::<i16>(), 0..30),
        b in prop::collection::vec(any::<i16>(), 0..30),
    ) {
        let left = List::from_sequence(a.clone());
        let right = List::from_sequence(b.clone());
        let joined = left.concat(&right);
        prop_assert_eq!(joined.len(), left.len() + right.len());
        let expected: Vec<i16> = a.into_iter().chain(b).collect();
        prop_assert_eq!(joined.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_reverse_involution(values in prop::collection::vec(any::<i32>(), 0..40)) {
        let list = List::from_sequence(values);
        prop_assert_eq!(list.reverse().reverse(), list);
    }

    #[test]
    fn test_sort_orders_values(values in prop::collection::vec(any::<i32>(), 0..30)) {
        let mut list = List::from_sequence(values.clone());
        list.sort();
        let sorted: Vec<i32> = list.iter().copied().collect();
        prop_assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
        let mut expected = values;
        expected.sort();
        prop_assert_eq!(sorted, expected);
    }

    #[test]
    fn test_shuffle_is_permutation(
        values in prop::collection::vec(0u8..8, 0..25),
        seed in any::<u64>(),
        depth in 0..4usize,
    ) {
        let mut list = List::from_sequence(values.clone());
        list.shuffle_with(&mut StdRng::seed_from_u64(seed), depth);
        prop_assert_eq!(list.len(), reachable(&list));
        let mut shuffled: Vec<u8> = list.iter().copied().collect();
        shuffled.sort();
        let mut expected = values;
        expected.sort();
        prop_assert_eq!(shuffled, expected);
    }
}
