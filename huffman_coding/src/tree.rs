//! Huffman code tree and its construction.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use dyn_size_of::GetSize;
use tracing::debug;
use crate::{Error, FrequencyTable, Result};

/// Binary tree of the prefix code.
///
/// The path from the root to a leaf is the codeword of the leaf's value:
/// going to the left child appends a `0` bit, going to the right one appends a `1` bit.
/// Every internal node has exactly two children and weight equal to the sum of their weights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeTree<V> {
    /// Leaf holding a symbol and its number of occurrences.
    Leaf { value: V, weight: u64 },
    /// Internal node holding two subtrees and the sum of their weights.
    Internal { left: Box<CodeTree<V>>, right: Box<CodeTree<V>>, weight: u64 }
}

/// Subtree waiting in the priority queue of the tree construction.
struct Pending<V> {
    weight: u64,
    /// Order of insertion, breaks ties between equal weights.
    seq: usize,
    node: CodeTree<V>
}

impl<V> PartialEq for Pending<V> {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl<V> Eq for Pending<V> {}

impl<V> PartialOrd for Pending<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl<V> Ord for Pending<V> {
    // reversed, as BinaryHeap pops the greatest item
    fn cmp(&self, other: &Self) -> Ordering {
        (other.weight, other.seq).cmp(&(self.weight, self.seq))
    }
}

impl<V: Clone> CodeTree<V> {
    /// Constructs the Huffman tree for given `frequencies`.
    ///
    /// Repeatedly merges two lightest subtrees, the first extracted becoming the left child
    /// and the second the right one. Among subtrees of equal weight, the earlier inserted is
    /// extracted first; leaves are inserted in the order of `frequencies`, before any internal node.
    /// Table with a single entry gives a tree that consists of a single leaf.
    ///
    /// Returns [`Error::EmptyInput`] if `frequencies` is empty.
    ///
    /// The algorithm runs in *O(n log n)* time, where *n* is the number of entries of `frequencies`.
    pub fn build(frequencies: &FrequencyTable<V>) -> Result<Self> {
        let mut queue = BinaryHeap::with_capacity(frequencies.len());
        for (seq, (value, weight)) in frequencies.iter().enumerate() {
            queue.push(Pending { weight, seq, node: CodeTree::Leaf { value: value.clone(), weight } });
        }
        let mut seq = queue.len();
        while let Some(first) = queue.pop() {
            let Some(second) = queue.pop() else {
                let root = first.node;
                debug!(symbols = frequencies.len(), weight = root.weight(), height = root.height(), "built code tree");
                return Ok(root);
            };
            let weight = first.weight.checked_add(second.weight)
                .ok_or(Error::InvalidData("total weight of symbols exceeds 64 bits"))?;
            queue.push(Pending {
                weight,
                seq,
                node: CodeTree::Internal { left: Box::new(first.node), right: Box::new(second.node), weight }
            });
            seq += 1;
        }
        Err(Error::EmptyInput)
    }
}

impl<V> CodeTree<V> {
    /// Returns the weight of `self`, i.e. the number of occurrences of all values in its leaves.
    #[inline] pub fn weight(&self) -> u64 {
        match self {
            CodeTree::Leaf { weight, .. } | CodeTree::Internal { weight, .. } => *weight
        }
    }

    /// Returns whether `self` is a leaf.
    #[inline] pub fn is_leaf(&self) -> bool { matches!(self, CodeTree::Leaf { .. }) }

    /// Returns the value of the leaf or `None` for an internal node.
    #[inline] pub fn value(&self) -> Option<&V> {
        match self {
            CodeTree::Leaf { value, .. } => Some(value),
            CodeTree::Internal { .. } => None
        }
    }

    /// Returns the left and right children of an internal node or `None` for a leaf.
    #[inline] pub fn children(&self) -> Option<(&Self, &Self)> {
        match self {
            CodeTree::Leaf { .. } => None,
            CodeTree::Internal { left, right, .. } => Some((&**left, &**right))
        }
    }

    /// Returns the child pointed by `bit` (`false` = left, `true` = right) or `None` for a leaf.
    #[inline] pub fn child(&self, bit: bool) -> Option<&Self> {
        self.children().map(|(left, right)| if bit { right } else { left })
    }

    /// Calls `f` for each leaf, from the leftmost to the rightmost.
    /// Arguments of `f` are: value of the leaf, its weight and its depth (the root has depth 0).
    pub fn for_each_leaf<F: FnMut(&V, u64, u32)>(&self, mut f: F) {
        let mut stack = vec![(self, 0u32)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                CodeTree::Leaf { value, weight } => f(value, *weight, depth),
                CodeTree::Internal { left, right, .. } => {
                    stack.push((&**right, depth + 1));
                    stack.push((&**left, depth + 1));
                }
            }
        }
    }

    /// Returns the number of leaves, i.e. the number of distinct values.
    pub fn leaves_count(&self) -> usize {
        let mut result = 0;
        self.for_each_leaf(|_, _, _| result += 1);
        result
    }

    /// Returns the depth of the deepest leaf (0 for a tree that consists of a single leaf).
    pub fn height(&self) -> u32 {
        let mut result = 0;
        self.for_each_leaf(|_, _, depth| result = result.max(depth));
        result
    }

    /// Returns the sum of weight times code length over all leaves,
    /// which equals the number of bits needed to encode the sequence `self` was built for.
    ///
    /// A single leaf tree is given one-bit code.
    /// Returns `None` if the result does not fit in `u64`.
    pub fn weighted_path_length(&self) -> Option<u64> {
        if let CodeTree::Leaf { weight, .. } = self { return Some(*weight); }
        let mut result = Some(0u64);
        self.for_each_leaf(|_, weight, depth| {
            result = result.and_then(|r| weight.checked_mul(depth as u64)?.checked_add(r))
        });
        result
    }
}

impl<V: GetSize> GetSize for CodeTree<V> {
    fn size_bytes_dyn(&self) -> usize {
        match self {
            CodeTree::Leaf { value, .. } => value.size_bytes_dyn(),
            CodeTree::Internal { left, right, .. } =>
                2 * std::mem::size_of::<Self>() + (**left).size_bytes_dyn() + (**right).size_bytes_dyn()
        }
    }
    const USES_DYN_MEM: bool = true;
}
