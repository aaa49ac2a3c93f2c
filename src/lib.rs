//! huffpack: a static, two-pass Huffman codec for 7-bit byte streams.
//!
//! The codec builds a prefix-code tree from the byte frequencies of its input, serializes that
//! tree into a compact, self-describing bitstream, and then packs one tree path per input byte
//! right behind it.
//!
//! ```text
//! [2 bits: 00][30 bits: length][tree, depth-first][payload paths][padding]
//! ```
//!
//! The two entry points are [`encode`] and [`decode`]. Everything else is exposed for tooling
//! and tests.
#![allow(non_upper_case_globals)]

/// Expands its body only when the `tracing` feature is enabled.
#[macro_export]
macro_rules! if_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(feature = "tracing")] {
                $($body)*
            }
        }
    };
}

/// Expands its body only when the `tracing` feature is disabled.
#[macro_export]
macro_rules! if_not_tracing {
    {$($body:tt)*} => {
        ::cfg_if::cfg_if! {
            if #[cfg(not(feature = "tracing"))] {
                $($body)*
            }
        }
    };
}

pub mod algorithms;
pub mod error;
pub mod mutator;


pub use algorithms::Huffman;
pub use algorithms::huffman::bits::{BitReader, BitWriter};
pub use algorithms::huffman::frequency::{FrequencyEntry, frequency_table};
pub use algorithms::huffman::serialize::{deserialize_tree, serialize_tree};
pub use algorithms::huffman::tree::{BitPath, TreeNode, WeightedNode, build_tree, build_weighted_tree};
pub use algorithms::huffman::{decode, encode};
pub use error::{HuffmanError, Result};
pub use mutator::{Mutator, RoundTripTestResult};
