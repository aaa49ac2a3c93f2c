use voxell_timer::time_fn;

use crate::mutator::{Mutator, Result};

if_tracing! {
    use tracing::info;
}

pub mod huffman;

/// A mutator described by a pair of plain functions.
#[derive(Clone, Copy, Debug)]
pub struct DynMutator {
    pub name: &'static str,
    pub drive_mutation: fn(data: &[u8], buf: &mut Vec<u8>) -> Result<()>,
    pub revert_mutation: fn(data: &[u8], buf: &mut Vec<u8>) -> Result<()>,
}

impl Mutator for DynMutator {
    fn drive_mutation(&mut self, data: &[u8], buf: &mut Vec<u8>) -> Result<()> {
        if_tracing! {
            let span = tracing::span!(tracing::Level::INFO, "mutator", name = self.name, func = "drive_mutation");
            let _enter = span.enter();
        }
        let (res, elapsed) = time_fn(|| (self.drive_mutation)(data, buf));
        if_tracing! {
            info!(elapsed_us = %elapsed.as_micros(), out_len = buf.len(), ok = res.is_ok(), "drive mutation finished");
        }
        if_not_tracing! {
            let _ = elapsed;
        }
        res
    }

    fn revert_mutation(&mut self, data: &[u8], buf: &mut Vec<u8>) -> Result<()> {
        if_tracing! {
            let span = tracing::span!(tracing::Level::INFO, "mutator", name = self.name, func = "revert_mutation");
            let _enter = span.enter();
        }
        let (res, elapsed) = time_fn(|| (self.revert_mutation)(data, buf));
        if_tracing! {
            info!(elapsed_us = %elapsed.as_micros(), out_len = buf.len(), ok = res.is_ok(), "revert mutation finished");
        }
        if_not_tracing! {
            let _ = elapsed;
        }
        res
    }
}

/// Static Huffman coding over 7-bit input.
pub const Huffman: DynMutator = DynMutator {
    name: "huffman",
    drive_mutation: huffman_drive,
    revert_mutation: huffman_revert,
};

fn huffman_drive(data: &[u8], buf: &mut Vec<u8>) -> Result<()> {
    *buf = huffman::encode(data)?;
    Ok(())
}

fn huffman_revert(data: &[u8], buf: &mut Vec<u8>) -> Result<()> {
    *buf = huffman::decode(data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HuffmanError;

    #[test]
    fn huffman_mutator_matches_the_codec() {
        let mut mutator = Huffman;
        let mut encoded = vec![0xff; 3];
        mutator.drive_mutation(b"hello world", &mut encoded).unwrap();
        assert_eq!(encoded, huffman::encode(b"hello world").unwrap());

        let mut decoded = Vec::new();
        mutator.revert_mutation(&encoded, &mut decoded).unwrap();
        assert_eq!(decoded, b"hello world");
    }

    #[test]
    fn huffman_mutator_surfaces_codec_errors() {
        let mut mutator = Huffman;
        let mut buf = Vec::new();
        let err = mutator.revert_mutation(&[], &mut buf).unwrap_err();
        assert_eq!(err.downcast_ref::<HuffmanError>(), Some(&HuffmanError::EmptyInput));
    }
}
