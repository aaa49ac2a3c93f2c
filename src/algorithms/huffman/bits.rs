//! Bit-granular writer and reader.
//!
//! Fields are packed MSB-first and are never byte-aligned: a field may start anywhere inside a
//! byte and spill over into the next one. The primitive operations move at most 8 bits; wider
//! fields are composed from them.

use crate::algorithms::huffman::tree::BitPath;
use crate::error::{HuffmanError, Result};

/// Returns a byte with the lowest `width` bits set.
const fn ones_mask(width: u32) -> u8 {
    if width >= 8 { u8::MAX } else { (1u8 << width) - 1 }
}

/// Accumulates bit fields into a growing byte buffer.
///
/// `bit_offset` is the number of bits already used in the last buffer byte. Zero means the next
/// write starts a fresh byte, either because the buffer is empty or because the last byte is full.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitWriter {
    buffer: Vec<u8>,
    bit_offset: u8,
}

impl BitWriter {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            bit_offset: 0,
        }
    }

    /// Writes the lowest `width` bits of `value`, MSB-first. `width` must be at most 8.
    ///
    /// A zero width writes nothing and does not allocate.
    pub fn write(&mut self, value: u8, width: u32) {
        debug_assert!(width <= 8, "primitive writes are limited to 8 bits, got {width}");
        let width = width.min(8);
        if width == 0 {
            return;
        }

        let value = value & ones_mask(width);
        if self.bit_offset == 0 {
            self.buffer.push(0);
        }

        let free = 8 - u32::from(self.bit_offset);
        if width <= free {
            self.write_to_last_byte(value, width);
            return;
        }

        // the field straddles a byte boundary: high part fills this byte, low part opens the next.
        let spill = width - free;
        self.write_to_last_byte(value >> spill, free);
        self.buffer.push(0);
        self.write_to_last_byte(value & ones_mask(spill), spill);
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.write(u8::from(bit), 1);
    }

    /// Writes the lowest `width` bits of `value`, MSB-first. `width` must be at most 32.
    pub fn write_field(&mut self, value: u32, width: u32) {
        debug_assert!(width <= 32, "fields are limited to 32 bits, got {width}");
        self.write_wide(u128::from(value), width.min(32));
    }

    /// Writes a root-to-leaf path, first branch first.
    pub fn write_path(&mut self, path: &BitPath) {
        self.write_wide(path.bits(), path.len());
    }

    fn write_wide(&mut self, value: u128, width: u32) {
        let mut remaining = width;
        while remaining > 0 {
            let take = remaining.min(8);
            remaining -= take;
            self.write((value >> remaining) as u8, take);
        }
    }

    fn write_to_last_byte(&mut self, value: u8, width: u32) {
        let shift = 8 - u32::from(self.bit_offset) - width;
        if let Some(last) = self.buffer.last_mut() {
            *last |= value << shift;
        }
        self.bit_offset = ((u32::from(self.bit_offset) + width) % 8) as u8;
    }

    /// Position inside the last byte, `0..=7`.
    pub const fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    /// Number of meaningful bits written so far, excluding padding.
    pub fn bit_len(&self) -> usize {
        match self.bit_offset {
            0 => self.buffer.len() * 8,
            used => (self.buffer.len() - 1) * 8 + usize::from(used),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer. Unused bits of the final byte are zero.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Reads bit fields from a borrowed byte buffer.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    buffer: &'a [u8],
    byte_index: usize,
    bit_offset: u8,
}

impl<'a> BitReader<'a> {
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            byte_index: 0,
            bit_offset: 0,
        }
    }

    /// Absolute bit cursor from the start of the buffer.
    pub const fn position(&self) -> usize {
        self.byte_index * 8 + self.bit_offset as usize
    }

    pub const fn remaining_bits(&self) -> usize {
        (self.buffer.len() * 8).saturating_sub(self.position())
    }

    pub const fn has_remaining(&self) -> bool {
        self.remaining_bits() > 0
    }

    fn ensure_available(&self, width: u32) -> Result<()> {
        let remaining = self.remaining_bits();
        if remaining < width as usize {
            return Err(HuffmanError::TruncatedStream {
                bit_position: self.position(),
                wanted: width - remaining as u32,
            });
        }
        Ok(())
    }

    /// Reads `width` bits (at most 8) and returns them right-aligned.
    ///
    /// # Errors
    ///
    /// Returns [`HuffmanError::TruncatedStream`] if fewer than `width` bits remain. The cursor
    /// does not move in that case.
    pub fn read(&mut self, width: u32) -> Result<u8> {
        debug_assert!(width <= 8, "primitive reads are limited to 8 bits, got {width}");
        let width = width.min(8);
        if width == 0 {
            return Ok(0);
        }
        self.ensure_available(width)?;

        let current = self.buffer[self.byte_index];
        let free = 8 - u32::from(self.bit_offset);
        let value = if width <= free {
            (current >> (free - width)) & ones_mask(width)
        } else {
            let spill = width - free;
            let high = current & ones_mask(free);
            let low = self.buffer[self.byte_index + 1] >> (8 - spill);
            (high << spill) | low
        };

        self.advance(width);
        Ok(value)
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read(1)? == 1)
    }

    /// Reads `width` bits (at most 32), MSB-first.
    ///
    /// # Errors
    ///
    /// Returns [`HuffmanError::TruncatedStream`] if fewer than `width` bits remain; nothing is
    /// consumed in that case.
    pub fn read_field(&mut self, width: u32) -> Result<u32> {
        debug_assert!(width <= 32, "fields are limited to 32 bits, got {width}");
        let width = width.min(32);
        self.ensure_available(width)?;

        let mut value = 0u32;
        let mut remaining = width;
        while remaining > 0 {
            let take = remaining.min(8);
            value = (value << take) | u32::from(self.read(take)?);
            remaining -= take;
        }
        Ok(value)
    }

    fn advance(&mut self, width: u32) {
        let total = u32::from(self.bit_offset) + width;
        self.byte_index += (total / 8) as usize;
        self.bit_offset = (total % 8) as u8;
    }
}
