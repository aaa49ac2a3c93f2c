//! Content codec: frames a payload behind a length header and the serialized tree.
//!
//! Encoding is two-pass. The first pass counts byte frequencies and builds the tree, the second
//! writes one tree path per input byte. Decoding reads the header, rebuilds the tree, and walks
//! it bit by bit until the announced number of bytes has been produced.

use crate::error::{HuffmanError, Result};

pub mod bits;
pub mod frequency;
pub mod serialize;
pub mod tree;

use self::bits::{BitReader, BitWriter};
use self::frequency::frequency_table;
use self::serialize::{ControlTag, TAG_WIDTH, deserialize_tree, serialize_tree};
use self::tree::{BitPath, TreeNode, build_tree};

if_tracing! {
    use tracing::{debug, info};
}

/// Width of the length field that follows the `00` tag.
pub const LENGTH_WIDTH: u32 = 30;

/// Largest input the 30-bit length header can describe.
pub const MAX_CONTENT_LENGTH: usize = (1 << LENGTH_WIDTH) - 1;

/// Largest byte value accepted by the encoder.
pub const MAX_SYMBOL: u8 = 0x7f;

/// Compresses `data`.
///
/// # Errors
///
/// - [`HuffmanError::InputTooLong`] if `data` is longer than [`MAX_CONTENT_LENGTH`].
/// - [`HuffmanError::InvalidInput`] for the first byte above `0x7f`, with its position.
/// - [`HuffmanError::Encoding`] if a byte cannot be located in its own tree (a bug).
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    if_tracing! {
        debug!(target: "huffman", input_len = data.len(), "huffman encode start");
    }

    check_len(data.len())?;
    if let Some(position) = data.iter().position(|&byte| byte > MAX_SYMBOL) {
        return Err(HuffmanError::InvalidInput {
            byte: data[position],
            position,
        });
    }

    let mut writer = BitWriter::new();
    write_header(&mut writer, data.len());

    let entries = frequency_table(data);
    let Some(tree) = build_tree(&entries) else {
        // empty input: the header alone describes it
        return Ok(writer.into_bytes());
    };
    serialize_tree(&tree, &mut writer);

    // every occurrence of a byte has the same path, so search once per distinct byte.
    let mut codes: [Option<BitPath>; 256] = [None; 256];
    for entry in &entries {
        let path = tree.search(entry.value).ok_or(HuffmanError::Encoding { byte: entry.value })?;
        codes[entry.value as usize] = Some(path);
    }

    for &byte in data {
        let path = codes[byte as usize].as_ref().ok_or(HuffmanError::Encoding { byte })?;
        writer.write_path(path);
    }

    if_tracing! {
        info!(
            target: "huffman",
            input_len = data.len(),
            output_len = writer.as_bytes().len(),
            alphabet = entries.len(),
            depth = tree.depth(),
            "huffman encode complete"
        );
    }

    Ok(writer.into_bytes())
}

/// Restores the bytes passed to [`encode`].
///
/// Bits after the last decoded byte are ignored.
///
/// # Errors
///
/// - [`HuffmanError::EmptyInput`] for a zero-length buffer.
/// - [`HuffmanError::CorruptStream`] when the header tag or a tree tag is wrong.
/// - [`HuffmanError::TruncatedStream`] when the buffer ends before the header, the tree, or the
///   announced number of bytes has been read.
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    if_tracing! {
        debug!(target: "huffman", input_len = data.len(), "huffman decode start");
    }

    if data.is_empty() {
        return Err(HuffmanError::EmptyInput);
    }

    let mut reader = BitReader::new(data);
    let expected = read_header(&mut reader)?;
    if expected == 0 {
        return Ok(Vec::new());
    }

    let tree = deserialize_tree(&mut reader)?.ok_or(HuffmanError::TruncatedStream {
        bit_position: reader.position(),
        wanted: TAG_WIDTH,
    })?;
    let output = decode_payload(&mut reader, &tree, expected)?;

    if_tracing! {
        info!(
            target: "huffman",
            input_len = data.len(),
            output_len = output.len(),
            depth = tree.depth(),
            "huffman decode complete"
        );
    }

    Ok(output)
}

/// Rejects lengths the 30-bit header cannot hold.
fn check_len(len: usize) -> Result<()> {
    if len > MAX_CONTENT_LENGTH {
        return Err(HuffmanError::InputTooLong { len });
    }
    Ok(())
}

fn write_header(writer: &mut BitWriter, len: usize) {
    ControlTag::Length.write(writer);
    writer.write_field((len & MAX_CONTENT_LENGTH) as u32, LENGTH_WIDTH);
}

/// Reads the `00` tag and the 30-bit content length.
pub fn read_header(reader: &mut BitReader<'_>) -> Result<usize> {
    let position = reader.position();
    let tag = ControlTag::read(reader)?;
    if tag != ControlTag::Length {
        return Err(HuffmanError::corrupt(
            position,
            format!("expected content-length tag {}, found {}", ControlTag::Length, tag),
        ));
    }
    Ok(reader.read_field(LENGTH_WIDTH)? as usize)
}

/// Walks `tree` once per output byte, `0` descending left and `1` descending right.
///
/// A lone-leaf tree consumes no bits at all.
pub fn decode_payload(reader: &mut BitReader<'_>, tree: &TreeNode, len: usize) -> Result<Vec<u8>> {
    // every byte costs at least one bit unless the tree is a single leaf
    let capacity = match tree {
        TreeNode::Leaf { .. } => len,
        TreeNode::Internal { .. } => len.min(reader.remaining_bits()),
    };
    let mut output = Vec::with_capacity(capacity);

    while output.len() < len {
        let mut node = tree;
        loop {
            match node {
                TreeNode::Leaf { value } => {
                    output.push(*value);
                    break;
                }
                TreeNode::Internal { left, right } => {
                    node = if reader.read_bit()? { right.as_ref() } else { left.as_ref() };
                }
            }
        }
    }

    Ok(output)
}
