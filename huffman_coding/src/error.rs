//! Errors reported by the codec.

use thiserror::Error;

/// Result type returned by fallible operations of this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Failures of tree construction, encoding, decoding and (de)serialization.
#[derive(Debug, Error)]
pub enum Error {
    /// No tree can be built for a frequency table without entries.
    #[error("empty input: no symbols to build the code tree from")]
    EmptyInput,

    /// The symbol at `position` of the encoded sequence has no code in the map.
    #[error("symbol at position {position} has no code in the code map")]
    UnmappedSymbol { position: usize },

    /// The bits ended inside a codeword; `pending_bits` bits of it were consumed.
    #[error("bit stream ends inside a codeword ({pending_bits} trailing bits do not form a code)")]
    TruncatedCode { pending_bits: u32 },

    /// A leaf at `depth` cannot be represented by a 64-bit code.
    #[error("code of length {depth} exceeds 64 bits")]
    CodeTooLong { depth: u32 },

    /// Serialized data is malformed.
    #[error("invalid data: {0}")]
    InvalidData(&'static str),

    /// I/O error from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
