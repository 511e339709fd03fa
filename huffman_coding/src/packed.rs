//! Bit sequences packed into 64-bit words.

use std::io;
use binout::{AsIs, Serializer, VByte};
use bitm::{BitAccess, ceiling_div};
use dyn_size_of::GetSize;
use crate::{Error, Result};

/// Sequence of bits packed into 64-bit words.
///
/// The `i`-th bit is stored at bit `i % 64` of `i / 64`-th word.
/// Bits of the last word beyond the length are always zeroed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedBits {
    words: Vec<u64>,
    len: usize
}

impl PackedBits {
    /// Constructs an empty sequence.
    #[inline] pub fn new() -> Self { Self::default() }

    /// Constructs an empty sequence that can hold `bits` bits without reallocating.
    pub fn with_capacity(bits: usize) -> Self {
        Self { words: Vec::with_capacity(ceiling_div(bits, 64)), len: 0 }
    }

    /// Appends `bit` to the end of `self`.
    pub fn push(&mut self, bit: bool) {
        if self.len % 64 == 0 { self.words.push(0); }
        if bit { self.words.set_bit(self.len); }
        self.len += 1;
    }

    /// Returns the number of bits.
    #[inline] pub fn len(&self) -> usize { self.len }

    /// Returns whether `self` contains no bits.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns `index`-th bit or `None` if `index` is out of bounds.
    #[inline] pub fn get(&self, index: usize) -> Option<bool> {
        (index < self.len).then(|| self.words.get_bit(index))
    }

    /// Returns iterator over all bits, from the first one.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> + DoubleEndedIterator + '_ {
        (0..self.len).map(|i| self.words.get_bit(i))
    }

    /// Returns the words the bits are packed into.
    #[inline] pub fn words(&self) -> &[u64] { &self.words }

    /// Returns the bits packed into bytes, the first bit at the most significant position of the first byte.
    /// Bits that pad the last byte are zeroed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = vec![0u8; ceiling_div(self.len, 8)];
        for (i, bit) in self.iter().enumerate() {
            if bit { result[i / 8] |= 0x80 >> (i % 8); }
        }
        result
    }

    /// Unpacks the first `len` bits from `bytes` (packed as by [`Self::to_bytes`]).
    ///
    /// Returns [`Error::InvalidData`] if `bytes` contain less than `len` bits.
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self> {
        if len > bytes.len().saturating_mul(8) {
            return Err(Error::InvalidData("bit length exceeds the number of given bytes"));
        }
        Ok((0..len).map(|i| bytes[i / 8] & (0x80 >> (i % 8)) != 0).collect())
    }

    /// Returns number of bytes which `write` will write.
    pub fn write_bytes(&self) -> usize {
        VByte::size(self.len) + AsIs::array_content_size(&self.words[..])
    }

    /// Writes `self` to the `output`: the number of bits followed by the words.
    pub fn write(&self, output: &mut dyn io::Write) -> io::Result<()> {
        VByte::write(output, self.len)?;
        AsIs::write_all(output, self.words.iter())
    }

    /// Reads (written by `write`) bits from the `input`.
    pub fn read(input: &mut dyn io::Read) -> io::Result<Self> {
        let len: usize = VByte::read(input)?;
        if len > usize::MAX - 63 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "bit length exceeds the addressable range"));
        }
        let words = <AsIs as Serializer<u64>>::read_n_iter(input, ceiling_div(len, 64)).collect::<io::Result<Vec<u64>>>()?;
        if len % 64 != 0 && words.last().map_or(false, |w| w >> (len % 64) != 0) {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "nonzero bits after the end of the bit sequence"));
        }
        Ok(Self { words, len })
    }
}

impl FromIterator<bool> for PackedBits {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl Extend<bool> for PackedBits {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter { self.push(bit); }
    }
}

impl GetSize for PackedBits {
    fn size_bytes_dyn(&self) -> usize { self.words.size_bytes_dyn() }
    fn size_bytes_content_dyn(&self) -> usize { self.words.size_bytes_content_dyn() }
    const USES_DYN_MEM: bool = true;
}
