//! Depth-first tree serialization.
//!
//! ```text
//! node  = leaf | left right | right left
//! leaf  = "01" byte(8 bits)
//! left  = "11" node
//! right = "10" node
//! ```
//!
//! Weights are not transported. The encoder always emits the left child first; the decoder
//! accepts either order. Nothing here is byte-aligned.

use core::fmt;

use crate::algorithms::huffman::bits::{BitReader, BitWriter};
use crate::algorithms::huffman::tree::TreeNode;
use crate::error::{HuffmanError, Result};

if_tracing! {
    use tracing::trace;
}

pub const TAG_WIDTH: u32 = 2;
pub const VALUE_WIDTH: u32 = 8;

/// Deepest nesting accepted while deserializing. No tree over an 8-bit alphabet is deeper.
pub const MAX_TREE_DEPTH: u32 = 256;

/// Two-bit marker that tells the reader what follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ControlTag {
    /// Only valid in front of the content-length header.
    Length = 0b00,
    Leaf = 0b01,
    Right = 0b10,
    Left = 0b11,
}

impl ControlTag {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Length,
            0b01 => Self::Leaf,
            0b10 => Self::Right,
            _ => Self::Left,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// The sibling tag of a branch tag.
    pub const fn complement(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            other => other,
        }
    }

    pub fn write(self, writer: &mut BitWriter) {
        writer.write(self.bits(), TAG_WIDTH);
    }

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.read(TAG_WIDTH).map(Self::from_bits)
    }
}

impl fmt::Display for ControlTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Leaf => "leaf",
            Self::Right => "right",
            Self::Left => "left",
        };
        write!(f, "{:02b} ({})", self.bits(), name)
    }
}

/// Appends `tree` to `writer`, pre-order, left child first.
pub fn serialize_tree(tree: &TreeNode, writer: &mut BitWriter) {
    match tree {
        TreeNode::Leaf { value } => {
            ControlTag::Leaf.write(writer);
            writer.write(*value, VALUE_WIDTH);
        }
        TreeNode::Internal { left, right } => {
            ControlTag::Left.write(writer);
            serialize_tree(left, writer);
            ControlTag::Right.write(writer);
            serialize_tree(right, writer);
        }
    }
}

/// Reads one tree from the reader's cursor.
///
/// Returns `Ok(None)` when the reader has no bits left. A branch whose sibling is missing because
/// the input ends right after it collapses into its only child.
///
/// # Errors
///
/// - [`HuffmanError::CorruptStream`] for the reserved `00` tag, for a sibling tag that does not
///   complement its branch, or for nesting deeper than [`MAX_TREE_DEPTH`].
/// - [`HuffmanError::TruncatedStream`] when a tag or leaf value is cut off.
pub fn deserialize_tree(reader: &mut BitReader<'_>) -> Result<Option<TreeNode>> {
    if !reader.has_remaining() {
        return Ok(None);
    }
    read_node(reader, 0).map(Some)
}

fn read_node(reader: &mut BitReader<'_>, depth: u32) -> Result<TreeNode> {
    let tag_position = reader.position();
    if depth > MAX_TREE_DEPTH {
        return Err(HuffmanError::corrupt(
            tag_position,
            format!("tree nests deeper than {MAX_TREE_DEPTH} levels"),
        ));
    }

    let first = match ControlTag::read(reader)? {
        ControlTag::Leaf => {
            let value = reader.read(VALUE_WIDTH)?;
            if_tracing! {
                trace!(target: "huffman", depth, value, "leaf");
            }
            return Ok(TreeNode::leaf(value));
        }
        ControlTag::Length => {
            return Err(HuffmanError::corrupt(
                tag_position,
                format!("unexpected tag {} inside the tree", ControlTag::Length),
            ));
        }
        branch => branch,
    };

    let child = read_node(reader, depth + 1)?;
    if reader.remaining_bits() < TAG_WIDTH as usize {
        return Ok(child);
    }

    let sibling_position = reader.position();
    let second = ControlTag::read(reader)?;
    if second != first.complement() {
        return Err(HuffmanError::corrupt(
            sibling_position,
            format!("expected {} after the {} subtree, found {}", first.complement(), first, second),
        ));
    }
    let sibling = read_node(reader, depth + 1)?;

    Ok(match first {
        ControlTag::Left => TreeNode::internal(child, sibling),
        _ => TreeNode::internal(sibling, child),
    })
}
