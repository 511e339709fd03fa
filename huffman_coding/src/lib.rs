#![doc = include_str!("../README.md")]

mod error;
pub use error::{Error, Result};
mod frequencies;
pub use frequencies::FrequencyTable;
mod tree;
pub use tree::CodeTree;
mod code;
pub use code::{Code, CodeMap};
mod decoder;
pub use decoder::{Decoder, Decoded, decode};
mod encoder;
pub use encoder::{Encoded, encode};
mod packed;
pub use packed::PackedBits;
mod compressed;
pub use compressed::Compressed;

/// Result of bit decoding returned by `consume` method of [`Decoder`].
#[derive(PartialOrd, Ord, PartialEq, Eq, Debug, Clone, Hash)]
pub enum DecodingResult<T> {
    /// Completed value that has been successfully decoded.
    Value(T),
    /// The codeword is incomplete and the next bit is needed.
    Incomplete
}

impl<T> DecodingResult<T> {
    /// Returns the decoded value or `None` if the codeword is incomplete.
    #[inline] pub fn value(self) -> Option<T> {
        match self {
            DecodingResult::Value(v) => Some(v),
            DecodingResult::Incomplete => None
        }
    }
}

impl<T> From<Option<T>> for DecodingResult<T> {
    #[inline(always)] fn from(option: Option<T>) -> Self {
        if let Some(v) = option { DecodingResult::Value(v) } else { DecodingResult::Incomplete }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabbbcc_round_trip() {
        let text: Vec<char> = "aabbbcc".chars().collect();
        let frequencies = FrequencyTable::<char>::count(&text);
        let tree = CodeTree::build(&frequencies).unwrap();
        let map = CodeMap::derive(&tree).unwrap();
        let bits = encode(&text, &map).unwrap();
        assert_eq!(Some(bits.len() as u64), tree.weighted_path_length());
        assert_eq!(bits.len(), 11);
        assert_eq!(decode(bits, &tree).unwrap(), text);
    }

    #[test]
    fn single_symbol_round_trip() {
        let frequencies = FrequencyTable::<char>::count("aaaa".chars());
        let tree = CodeTree::build(&frequencies).unwrap();
        let map = CodeMap::derive(&tree).unwrap();
        let bits = encode("aaaa".chars(), &map).unwrap();
        assert_eq!(bits, [false; 4]);
        assert_eq!(decode(bits, &tree).unwrap(), ['a'; 4]);
    }

    #[test]
    fn decoding_result_from_option() {
        assert_eq!(DecodingResult::from(Some(3)), DecodingResult::Value(3));
        assert_eq!(DecodingResult::<u8>::from(None), DecodingResult::Incomplete);
        assert_eq!(DecodingResult::Value('x').value(), Some('x'));
    }
}
