//! Error values produced by the codec.
//!
//! Every failure is returned to the caller; nothing on the encode or decode path aborts the
//! process, and no state survives a failed call.

use thiserror::Error;

use crate::algorithms::huffman::MAX_CONTENT_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    /// The encoder input contains a byte outside `0..=127`.
    #[error("byte {byte:#04x} at position {position} is outside the 7-bit range 0..=127")]
    InvalidInput { byte: u8, position: usize },

    /// A byte of the input has no path in the tree built from that same input.
    ///
    /// This indicates a bug in tree construction and should never be observed.
    #[error("byte {byte:#04x} has no path in the huffman tree built from its own input")]
    Encoding { byte: u8 },

    /// The input exceeds what the 30-bit length header can describe.
    #[error("input of {len} bytes does not fit the 30-bit length header (max {MAX_CONTENT_LENGTH} bytes)")]
    InputTooLong { len: usize },

    /// The decoder was handed a zero-length buffer.
    #[error("cannot decode an empty buffer")]
    EmptyInput,

    /// A control tag did not match what the grammar allows at that position.
    #[error("corrupt stream at bit {bit_position}: {reason}")]
    CorruptStream { bit_position: usize, reason: String },

    /// The bit cursor ran past the end of the buffer.
    #[error("stream truncated at bit {bit_position}: {wanted} more bit(s) required")]
    TruncatedStream { bit_position: usize, wanted: u32 },
}

impl HuffmanError {
    pub(crate) fn corrupt(bit_position: usize, reason: impl Into<String>) -> Self {
        Self::CorruptStream {
            bit_position,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = HuffmanError> = core::result::Result<T, E>;
