use std::borrow::Borrow;
use std::hash::Hash;
use std::iter::{Enumerate, FusedIterator};
use crate::{Code, CodeMap, Error, Result};

/// Iterator over the bits of the codewords of the values exposed by the inner iterator.
///
/// Yields [`Error::UnmappedSymbol`] (and then stops) at the first value that has no code.
pub struct Encoded<'map, ValueType, I> {
    map: &'map CodeMap<ValueType>,
    values: Enumerate<I>,
    /// Codeword of the last value read from `values`.
    code: Code,
    /// Index of the next bit of `code` to expose.
    bit_index: u32,
    failed: bool
}

impl<'map, ValueType, I: Iterator> Encoded<'map, ValueType, I> {
    /// Returns iterator over bits of `values` encoded with `map`.
    pub fn new<S: IntoIterator<IntoIter = I>>(values: S, map: &'map CodeMap<ValueType>) -> Self {
        Self { map, values: values.into_iter().enumerate(), code: Code::default(), bit_index: 0, failed: false }
    }
}

impl<'map, ValueType, I> Iterator for Encoded<'map, ValueType, I>
    where ValueType: Hash + Eq, I: Iterator, I::Item: Borrow<ValueType>
{
    type Item = Result<bool>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bit_index == self.code.len {
            if self.failed { return None; }
            let (position, value) = self.values.next()?;
            match self.map.get(value.borrow()) {
                Some(code) => {
                    self.code = code;
                    self.bit_index = 0;
                }
                None => {
                    self.failed = true;
                    return Some(Err(Error::UnmappedSymbol { position }));
                }
            }
        }
        let bit = self.code.get(self.bit_index);
        self.bit_index += 1;
        Some(Ok(bit))
    }
}

impl<'map, ValueType, I> FusedIterator for Encoded<'map, ValueType, I>
    where ValueType: Hash + Eq, I: FusedIterator, I::Item: Borrow<ValueType> {}

/// Encodes all `values` with `map` and returns the concatenation of their codewords.
///
/// Returns [`Error::UnmappedSymbol`] if some of the `values` has no code in `map`.
pub fn encode<ValueType, S>(values: S, map: &CodeMap<ValueType>) -> Result<Vec<bool>>
    where ValueType: Hash + Eq, S: IntoIterator, S::Item: Borrow<ValueType>
{
    Encoded::new(values, map).collect()
}
