//! Compressed sequence: frequency table with the bits of the encoded values.

use std::hash::Hash;
use std::io;
use tracing::debug;
use crate::{CodeMap, CodeTree, Decoded, Encoded, Error, FrequencyTable, PackedBits, Result};

/// Sequence of values compressed with Huffman coding.
///
/// Only the frequency table is stored besides the bits;
/// the code tree is rebuilt from it for decompression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compressed<V> {
    frequencies: FrequencyTable<V>,
    bits: PackedBits
}

impl<V: Hash + Eq + Clone> Compressed<V> {
    /// Compresses `values`.
    ///
    /// Returns [`Error::EmptyInput`] if `values` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use huffman_coding::Compressed;
    ///
    /// let text: Vec<char> = "mississippi".chars().collect();
    /// let compressed = Compressed::compress(&text).unwrap();
    /// assert_eq!(compressed.bits().len(), 21);
    /// assert_eq!(compressed.decompress().unwrap(), text);
    /// ```
    pub fn compress(values: &[V]) -> Result<Self> {
        let frequencies = FrequencyTable::count(values);
        let tree = CodeTree::build(&frequencies)?;
        let map = CodeMap::derive(&tree)?;
        let mut bits = PackedBits::with_capacity(map.encoded_len(&frequencies).map_or(0, |len| len as usize));
        for bit in Encoded::new(values, &map) { bits.push(bit?); }
        debug!(symbols = values.len(), bits = bits.len(), "compressed");
        Ok(Self { frequencies, bits })
    }

    /// Decompresses and returns the values.
    ///
    /// Returns [`Error::InvalidData`] if the number of decoded values
    /// differs from the number of values counted in the frequency table.
    pub fn decompress(&self) -> Result<Vec<V>> {
        let tree = CodeTree::build(&self.frequencies)?;
        let expected = self.frequencies.total();
        let mut result = Vec::with_capacity(expected.min(self.bits.len() as u64) as usize);
        for value in Decoded::new(&tree, self.bits.iter()) {
            result.push(value?.clone());
        }
        if result.len() as u64 != expected {
            return Err(Error::InvalidData("number of decoded values differs from the frequency table"));
        }
        Ok(result)
    }
}

impl<V> Compressed<V> {
    /// Returns the frequency table of the compressed values.
    #[inline] pub fn frequencies(&self) -> &FrequencyTable<V> { &self.frequencies }

    /// Returns the concatenated codewords of the compressed values.
    #[inline] pub fn bits(&self) -> &PackedBits { &self.bits }

    /// Returns the frequency table and the bits.
    #[inline] pub fn into_parts(self) -> (FrequencyTable<V>, PackedBits) { (self.frequencies, self.bits) }

    /// Constructs `Self` from the frequency table and the bits obtained by encoding with the tree built from it.
    /// The bits are not checked until decompression.
    #[inline] pub fn from_parts(frequencies: FrequencyTable<V>, bits: PackedBits) -> Self {
        Self { frequencies, bits }
    }
}

impl Compressed<u8> {
    /// Returns number of bytes which `write` will write.
    pub fn write_bytes(&self) -> usize {
        self.frequencies.write_bytes() + self.bits.write_bytes()
    }

    /// Writes `self` to the `output`: the frequency table followed by the bits.
    pub fn write(&self, output: &mut dyn io::Write) -> io::Result<()> {
        self.frequencies.write(output)?;
        self.bits.write(output)
    }

    /// Reads (written by `write`) compressed bytes from the `input`.
    pub fn read(input: &mut dyn io::Read) -> io::Result<Self> {
        let frequencies = FrequencyTable::read(input)?;
        let bits = PackedBits::read(input)?;
        Ok(Self { frequencies, bits })
    }
}
