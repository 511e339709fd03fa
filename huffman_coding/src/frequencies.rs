//! Tools to count frequencies of symbols.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::io;
use binout::{AsIs, Serializer, VByte};
use fsum::FSum;

/// Numbers of occurrences of the distinct symbols of some sequence.
///
/// Symbols are kept in the order of their first occurrence.
/// This order is the order in which the leaves enter the tree construction,
/// so it decides which of the equally weighted nodes are merged first.
#[derive(Clone, Debug)]
pub struct FrequencyTable<V> {
    /// Distinct symbols and their numbers of occurrences, in order of first occurrence.
    entries: Vec<(V, u64)>,
    /// Index in `entries` of each symbol.
    index: HashMap<V, usize>
}

impl<V> Default for FrequencyTable<V> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<V: PartialEq> PartialEq for FrequencyTable<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Eq> Eq for FrequencyTable<V> {}

impl<V: Hash + Eq + Clone> FrequencyTable<V> {
    /// Counts occurrences of all symbols exposed by `iter`.
    ///
    /// # Example
    ///
    /// ```
    /// use huffman_coding::FrequencyTable;
    ///
    /// let table = FrequencyTable::<char>::count("aabbbcc".chars());
    /// assert_eq!(table.get(&'b'), Some(3));
    /// assert_eq!(table.total(), 7);
    /// ```
    pub fn count<Iter>(iter: Iter) -> Self
        where Iter: IntoIterator, Iter::Item: Borrow<V>
    {
        let mut result = Self::default();
        for v in iter { result.add(v.borrow(), 1); }
        result
    }

    /// Constructs the table from known `(symbol, number of occurrences)` pairs.
    ///
    /// Pairs with zero occurrences are skipped, repeated symbols have their numbers summed.
    pub fn from_counts<Iter: IntoIterator<Item = (V, u64)>>(counts: Iter) -> Self {
        let mut result = Self::default();
        for (v, c) in counts {
            if c != 0 { result.add(&v, c); }
        }
        result
    }

    fn add(&mut self, value: &V, occurrences: u64) {
        match self.index.get(value) {
            Some(&i) => self.entries[i].1 += occurrences,
            None => {
                self.index.insert(value.clone(), self.entries.len());
                self.entries.push((value.clone(), occurrences));
            }
        }
    }

    /// Returns the number of occurrences of `value` or `None` if `value` has not been counted.
    pub fn get(&self, value: &V) -> Option<u64> {
        self.index.get(value).map(|&i| self.entries[i].1)
    }
}

impl<V> FrequencyTable<V> {
    /// Returns the number of distinct symbols.
    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    /// Returns whether no symbol has been counted.
    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Returns the total number of occurrences, i.e. the length of the counted sequence.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Returns iterator over `(symbol, number of occurrences)` pairs, in order of first occurrence.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&V, u64)> + '_ {
        self.entries.iter().map(|(v, c)| (v, *c))
    }

    /// Returns the Shannon entropy (in bits per symbol) of the counted sequence.
    pub fn entropy(&self) -> f64 {
        let total = self.total() as f64;
        - FSum::with_all(self.entries.iter()
            .map(|(_, c)| { let p = *c as f64 / total; p * p.log2() })).value()
    }
}

impl FrequencyTable<u8> {
    /// Returns number of bytes which `write` will write.
    pub fn write_bytes(&self) -> usize {
        VByte::size(self.entries.len()) +
        self.entries.iter().map(|(v, c)| AsIs::size(*v) + VByte::size(*c)).sum::<usize>()
    }

    /// Writes `self` to the `output`: the number of entries followed by the entries
    /// (each as a raw byte and its number of occurrences), in order of first occurrence.
    pub fn write(&self, output: &mut dyn io::Write) -> io::Result<()> {
        VByte::write(output, self.entries.len())?;
        self.entries.iter().try_for_each(|(v, c)| {
            AsIs::write(output, *v)?;
            VByte::write(output, *c)
        })
    }

    /// Reads (written by `write`) table from the `input`.
    pub fn read(input: &mut dyn io::Read) -> io::Result<Self> {
        let len: usize = VByte::read(input)?;
        if len > 256 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "byte frequency table with more than 256 entries"));
        }
        let mut result = Self::default();
        for _ in 0..len {
            let value: u8 = AsIs::read(input)?;
            let occurrences: u64 = VByte::read(input)?;
            if occurrences == 0 || result.index.contains_key(&value) {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "malformed byte frequency table entry"));
            }
            result.add(&value, occurrences);
        }
        Ok(result)
    }
}
