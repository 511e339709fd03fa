//! Codewords and the map that assigns them to values.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::debug;
use crate::{CodeTree, Error, FrequencyTable, Result};

/// `Code` represents a codeword of at most [`Code::MAX_LEN`] bits.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Hash)]
pub struct Code {
    /// Bits of the codeword. The lowest bit of `content` is the first bit of the codeword.
    pub content: u64,
    /// Number of bits.
    pub len: u32
}

impl Code {
    /// The largest number of bits the code can consist of.
    pub const MAX_LEN: u32 = u64::BITS;

    /// Appends `bit` to the end of `self`. `self` must be shorter than [`Self::MAX_LEN`].
    #[inline] pub fn push(&mut self, bit: bool) {
        self.content |= (bit as u64) << self.len;
        self.len += 1;
    }

    /// Returns `index`-th bit of `self`, which must be less than `self.len`.
    #[inline] pub fn get(&self, index: u32) -> bool {
        (self.content >> index) & 1 != 0
    }

    /// Returns whether `self` consists of zero bits.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns iterator over bits of `self`, from the first one.
    pub fn iter(self) -> impl ExactSizeIterator<Item = bool> {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Returns whether `self` is a prefix of `other` (every code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (self.len == 0 || other.content << (Self::MAX_LEN - self.len) == self.content << (Self::MAX_LEN - self.len))
    }
}

impl fmt::Display for Code {
    /// Writes bits of `self` as a string of `0`s and `1`s.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|bit| f.write_str(if bit { "1" } else { "0" }))
    }
}

/// Map from values to their codewords.
#[derive(Clone, Debug)]
pub struct CodeMap<V> {
    codes: HashMap<V, Code>
}

impl<V: Hash + Eq + Clone> CodeMap<V> {
    /// Assigns each leaf of `tree` the path from the root to it.
    ///
    /// The only value of a tree that consists of a single leaf gets the one-bit code `0`,
    /// as [`Decoder`](crate::Decoder) reads one occurrence of such value from every bit.
    ///
    /// Returns [`Error::CodeTooLong`] if some leaf is deeper than [`Code::MAX_LEN`].
    pub fn derive(tree: &CodeTree<V>) -> Result<Self> {
        let mut codes = HashMap::new();
        if let Some(value) = tree.value() {
            codes.insert(value.clone(), Code { content: 0, len: 1 });
            return Ok(Self { codes });
        }
        let mut stack = vec![(tree, Code::default())];
        let mut max_len = 0;
        while let Some((node, code)) = stack.pop() {
            match node.children() {
                None => {
                    if let Some(value) = node.value() { codes.insert(value.clone(), code); }
                    max_len = max_len.max(code.len);
                }
                Some((left, right)) => {
                    if code.len == Code::MAX_LEN {
                        return Err(Error::CodeTooLong { depth: code.len + 1 });
                    }
                    let mut right_code = code;
                    right_code.push(true);
                    stack.push((right, right_code));
                    let mut left_code = code;
                    left_code.push(false);
                    stack.push((left, left_code));
                }
            }
        }
        debug!(codes = codes.len(), max_len, "derived code map");
        Ok(Self { codes })
    }
}

impl<V: Hash + Eq> CodeMap<V> {
    /// Returns the code of `value` or `None` if `value` has no code.
    #[inline] pub fn get(&self, value: &V) -> Option<Code> {
        self.codes.get(value).copied()
    }

    /// Returns the number of bits needed to encode the sequence with given `frequencies`,
    /// or `None` if some of its values have no code or the number does not fit in `u64`.
    pub fn encoded_len(&self, frequencies: &FrequencyTable<V>) -> Option<u64> {
        frequencies.iter().try_fold(0u64, |acc, (v, occurrences)|
            (self.get(v)?.len as u64).checked_mul(occurrences)?.checked_add(acc))
    }

    /// Returns the average code length (in bits per symbol) of the sequence with given `frequencies`,
    /// or `None` if some of its values have no code or `frequencies` is empty.
    pub fn average_len(&self, frequencies: &FrequencyTable<V>) -> Option<f64> {
        if frequencies.is_empty() { return None; }
        self.encoded_len(frequencies).map(|bits| bits as f64 / frequencies.total() as f64)
    }
}

impl<V> CodeMap<V> {
    /// Returns the number of values that have codes.
    #[inline] pub fn len(&self) -> usize { self.codes.len() }

    /// Returns whether `self` contains no code.
    #[inline] pub fn is_empty(&self) -> bool { self.codes.is_empty() }

    /// Returns iterator over all value-code pairs, in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&V, Code)> + '_ {
        self.codes.iter().map(|(v, c)| (v, *c))
    }

    /// Returns the length of the longest code.
    pub fn max_len(&self) -> u32 {
        self.codes.values().map(|c| c.len).max().unwrap_or(0)
    }
}
