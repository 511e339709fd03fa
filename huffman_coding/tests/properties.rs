//! Property-based tests of the whole coding pipeline.

use proptest::prelude::*;
use huffman_coding::{CodeMap, CodeTree, Compressed, Error, FrequencyTable, decode, encode};

/// Checks the weight of each internal node and returns the weight of `tree`.
fn checked_weight(tree: &CodeTree<u8>) -> u64 {
    match tree.children() {
        None => tree.weight(),
        Some((left, right)) => {
            let sum = checked_weight(left) + checked_weight(right);
            assert_eq!(tree.weight(), sum);
            sum
        }
    }
}

/// Computes the minimal total code length for the given weights,
/// as the sum of weights of the nodes created by merging two lightest ones.
fn optimal_cost(mut weights: Vec<u64>) -> u64 {
    if weights.len() == 1 { return weights[0]; }
    let mut cost = 0;
    while weights.len() > 1 {
        weights.sort_unstable_by(|a, b| b.cmp(a));
        let merged = weights.pop().unwrap() + weights.pop().unwrap();
        cost += merged;
        weights.push(merged);
    }
    cost
}

fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 1..2000),
        prop::collection::vec(0u8..4, 1..300),
        prop::collection::vec(Just(b'z'), 1..50),
    ]
}

proptest! {
    #[test]
    fn prop_round_trip(text in text_strategy()) {
        let frequencies = FrequencyTable::<u8>::count(&text);
        let tree = CodeTree::build(&frequencies).unwrap();
        let map = CodeMap::derive(&tree).unwrap();
        let bits = encode(&text, &map).unwrap();
        prop_assert_eq!(Some(bits.len() as u64), tree.weighted_path_length());
        prop_assert_eq!(Some(bits.len() as u64), map.encoded_len(&frequencies));
        prop_assert_eq!(decode(bits, &tree).unwrap(), text);
    }

    #[test]
    fn prop_compressed_round_trip(text in text_strategy()) {
        let compressed = Compressed::compress(&text).unwrap();
        let mut buff = Vec::new();
        compressed.write(&mut buff).unwrap();
        let read = Compressed::<u8>::read(&mut &buff[..]).unwrap();
        prop_assert_eq!(read.decompress().unwrap(), text);
    }

    #[test]
    fn prop_prefix_free(text in text_strategy()) {
        let map = CodeMap::derive(&CodeTree::build(&FrequencyTable::<u8>::count(&text)).unwrap()).unwrap();
        for (v1, c1) in map.iter() {
            prop_assert!(!c1.is_empty());
            for (v2, c2) in map.iter() {
                if v1 != v2 { prop_assert!(!c1.is_prefix_of(&c2)); }
            }
        }
    }

    #[test]
    fn prop_weights(text in text_strategy()) {
        let frequencies = FrequencyTable::<u8>::count(&text);
        let tree = CodeTree::build(&frequencies).unwrap();
        prop_assert_eq!(checked_weight(&tree), text.len() as u64);
        prop_assert_eq!(tree.leaves_count(), frequencies.len());
        tree.for_each_leaf(|v, w, _| assert_eq!(frequencies.get(v), Some(w)));
    }

    #[test]
    fn prop_optimal(weights in prop::collection::vec(1u64..1000, 1..100)) {
        let frequencies = FrequencyTable::from_counts(weights.iter().copied().enumerate());
        let tree = CodeTree::build(&frequencies).unwrap();
        prop_assert_eq!(tree.weighted_path_length(), Some(optimal_cost(weights)));
    }

    #[test]
    fn prop_deterministic(weights in prop::collection::vec(1u64..20, 1..60)) {
        let frequencies = FrequencyTable::from_counts(weights.iter().copied().enumerate());
        let tree = CodeTree::build(&frequencies).unwrap();
        prop_assert_eq!(&tree, &CodeTree::build(&frequencies.clone()).unwrap());
        prop_assert_eq!(&tree, &CodeTree::build(&FrequencyTable::from_counts(weights.into_iter().enumerate())).unwrap());
    }

    #[test]
    fn prop_truncated(text in prop::collection::vec(0u8..6, 2..300)) {
        let tree = CodeTree::build(&FrequencyTable::<u8>::count(&text)).unwrap();
        let map = CodeMap::derive(&tree).unwrap();
        let last_code = map.get(text.last().unwrap()).unwrap();
        let mut bits = encode(&text, &map).unwrap();
        bits.pop();
        let decoded = decode(bits, &tree);
        if last_code.len > 1 {
            prop_assert!(matches!(decoded, Err(Error::TruncatedCode { .. })), "expected truncated code error");
        } else {
            prop_assert_eq!(decoded.unwrap(), &text[..text.len()-1]);
        }
    }
}

#[test]
fn known_optimal_costs() {
    // a:2 b:3 c:2 -> b at depth 1, a and c at depth 2
    let tree = CodeTree::build(&FrequencyTable::<char>::count("aabbbcc".chars())).unwrap();
    assert_eq!(tree.weighted_path_length(), Some(3 + 2 * 2 + 2 * 2));
    // classic example: f:45 c:12 b:13 d:16 e:9 a:5 -> 224 bits
    let frequencies = FrequencyTable::from_counts([('a', 5), ('b', 13), ('c', 12), ('d', 16), ('e', 9), ('f', 45)]);
    let tree = CodeTree::build(&frequencies).unwrap();
    assert_eq!(tree.weighted_path_length(), Some(224));
    let map = CodeMap::derive(&tree).unwrap();
    assert_eq!(map.get(&'f').unwrap().len, 1);
    assert_eq!(map.get(&'a').unwrap().len, 4);
    assert_eq!(map.get(&'e').unwrap().len, 4);
}

#[test]
fn single_symbol() {
    let frequencies = FrequencyTable::<char>::count("aaaa".chars());
    let tree = CodeTree::build(&frequencies).unwrap();
    assert!(tree.is_leaf());
    let map = CodeMap::derive(&tree).unwrap();
    let bits = encode("aaaa".chars(), &map).unwrap();
    assert_eq!(bits.len(), 4);
    assert_eq!(decode(bits, &tree).unwrap(), ['a'; 4]);
}

#[test]
fn empty_input() {
    let frequencies = FrequencyTable::<u8>::count(b"");
    assert!(frequencies.is_empty());
    assert!(matches!(CodeTree::build(&frequencies), Err(Error::EmptyInput)));
}
