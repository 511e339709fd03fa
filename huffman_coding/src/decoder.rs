use tracing::debug;
use crate::{CodeTree, DecodingResult, Error, Result};

/// Position of the [`Decoder`] in the tree.
#[derive(Debug)]
enum State<'tree, ValueType> {
    /// At the root, ready for the first bit of a codeword.
    Root,
    /// At an internal node, inside a codeword.
    Traversing(&'tree CodeTree<ValueType>)
}

/// Decoder that decodes values by walking the code tree, consuming one bit at a time.
///
/// Reaching a leaf completes the codeword: its value is returned
/// and the decoder goes back to the root before the next bit is consumed.
/// A tree that consists of a single leaf decodes one occurrence of its value from every bit.
///
/// Time complexity of decoding the whole code is *O(length of the code)*.
///
/// Memory complexity: *O(1)*
#[derive(Debug)]
pub struct Decoder<'tree, ValueType> {
    tree: &'tree CodeTree<ValueType>,
    state: State<'tree, ValueType>,
    /// Number of bits of the current, incomplete codeword.
    consumed: u32
}

impl<'tree, ValueType> Decoder<'tree, ValueType> {
    /// Constructs decoder for given `tree`.
    pub fn new(tree: &'tree CodeTree<ValueType>) -> Self {
        Self { tree, state: State::Root, consumed: 0 }
    }

    /// Resets `self` to initial state and makes it ready to decode next value.
    pub fn reset(&mut self) {
        self.state = State::Root;
        self.consumed = 0;
    }

    /// Returns the number of bits consumed since the last completed codeword (or construction or reset).
    #[inline(always)] pub fn consumed_bits(&self) -> u32 { self.consumed }

    /// Consumes a `bit` (`false` = left, `true` = right) of the codeword and returns:
    /// - a value if the given `bit` finishes the codeword;
    /// - or [`DecodingResult::Incomplete`] if the codeword is incomplete and the next bit is needed.
    pub fn consume(&mut self, bit: bool) -> DecodingResult<&'tree ValueType> {
        let node = match self.state {
            State::Root => self.tree,
            State::Traversing(node) => node
        };
        let next: &'tree CodeTree<ValueType> = match node {
            CodeTree::Leaf { value, .. } => return DecodingResult::Value(value),  // single leaf tree
            CodeTree::Internal { left, right, .. } => if bit { &**right } else { &**left }
        };
        match next {
            CodeTree::Leaf { value, .. } => {
                self.reset();
                DecodingResult::Value(value)
            },
            CodeTree::Internal { .. } => {
                self.state = State::Traversing(next);
                self.consumed += 1;
                DecodingResult::Incomplete
            }
        }
    }

    /// Tries to decode and return a single value from the `bits` iterator,
    /// consuming as many bits as needed.
    ///
    /// Returns [`DecodingResult::Incomplete`] if the iterator exhausted before the value was decoded
    /// ([`Self::consumed_bits`] enables checking if the iterator yielded any bit of the codeword).
    pub fn decode_next<I: Iterator<Item = bool>>(&mut self, bits: &mut I) -> DecodingResult<&'tree ValueType> {
        for bit in bits {
            if let DecodingResult::Value(v) = self.consume(bit) { return DecodingResult::Value(v); }
        }
        DecodingResult::Incomplete
    }

    /// Checks whether the bits consumed so far form complete codewords.
    ///
    /// Returns [`Error::TruncatedCode`] if `self` is inside a codeword.
    pub fn finish(&self) -> Result<()> {
        match self.state {
            State::Root => Ok(()),
            State::Traversing(_) => {
                debug!(pending_bits = self.consumed, "bit stream ends inside a codeword");
                Err(Error::TruncatedCode { pending_bits: self.consumed })
            }
        }
    }
}

/// Iterator over values decoded from the bits exposed by the inner iterator.
///
/// Yields [`Error::TruncatedCode`] (and then stops) if the bits end inside a codeword.
pub struct Decoded<'tree, ValueType, I> {
    decoder: Decoder<'tree, ValueType>,
    bits: I,
    finished: bool
}

impl<'tree, ValueType, I: Iterator<Item = bool>> Decoded<'tree, ValueType, I> {
    /// Returns iterator over values decoded from `bits` with `tree`.
    pub fn new<B: IntoIterator<IntoIter = I>>(tree: &'tree CodeTree<ValueType>, bits: B) -> Self {
        Self { decoder: Decoder::new(tree), bits: bits.into_iter(), finished: false }
    }
}

impl<'tree, ValueType, I: Iterator<Item = bool>> Iterator for Decoded<'tree, ValueType, I> {
    type Item = Result<&'tree ValueType>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished { return None; }
        if let DecodingResult::Value(v) = self.decoder.decode_next(&mut self.bits) {
            return Some(Ok(v));
        }
        self.finished = true;
        self.decoder.finish().err().map(Err)
    }
}

impl<'tree, ValueType, I: Iterator<Item = bool>> std::iter::FusedIterator for Decoded<'tree, ValueType, I> {}

/// Decodes all values from `bits` using `tree`.
///
/// Returns [`Error::TruncatedCode`] if `bits` end inside a codeword.
pub fn decode<ValueType: Clone, B: IntoIterator<Item = bool>>(bits: B, tree: &CodeTree<ValueType>) -> Result<Vec<ValueType>> {
    Decoded::new(tree, bits).map(|v| v.cloned()).collect()
}
