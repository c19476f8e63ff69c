//! Pack encoded bits into bytes and read them back.
//!
//! Bits fill each byte from the least significant bit upwards, the same order
//! DEFLATE readers use. The last byte is zero padded; the bit length travels
//! alongside the bytes so the padding is never mistaken for data.

use serde::{Deserialize, Serialize};

use crate::error::{HuffmanError, Result};

/// The number of bits in a byte.
const BITS_PER_BYTE: usize = 8;

/// Bits packed into bytes, plus how many of them are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    pub bit_len: usize,
}

impl PackedBits {
    /// Number of bits the bytes can hold, padding included.
    pub fn capacity(&self) -> usize {
        self.bytes.len() * BITS_PER_BYTE
    }

    /// Reader over the meaningful bits.
    /// Fails if `bit_len` claims more bits than the bytes hold.
    pub fn reader(&self) -> Result<BitReader<'_>> {
        BitReader::new(&self.bytes, self.bit_len).ok_or_else(|| {
            HuffmanError::malformed(format!(
                "{} bits declared but only {} available",
                self.bit_len,
                self.capacity()
            ))
        })
    }
}

/// A struct representing the position of a bit in a byte array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct BitPosition {
    byte_index: usize,
    bit_index: usize,
}

impl BitPosition {
    fn bit_offset(&self) -> usize {
        self.byte_index * BITS_PER_BYTE + self.bit_index
    }

    /// Move one bit forward.
    fn step(&mut self) {
        self.bit_index += 1;
        if self.bit_index == BITS_PER_BYTE {
            self.bit_index = 0;
            self.byte_index += 1;
        }
    }
}

/// Appends single bits to a growing byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    position: BitPosition,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(BITS_PER_BYTE)),
            position: BitPosition::default(),
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        if self.position.bit_index == 0 {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[self.position.byte_index] |= 1 << self.position.bit_index;
        }
        self.position.step();
    }

    /// Number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.position.bit_offset()
    }

    pub fn finish(self) -> PackedBits {
        let bit_len = self.bit_len();
        PackedBits {
            bytes: self.bytes,
            bit_len,
        }
    }
}

/// Reads single bits out of a byte slice, stopping after `bit_len` bits.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    position: BitPosition,
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over the first `bit_len` bits of `data`.
    /// Returns None if `data` holds fewer than `bit_len` bits.
    pub fn new(data: &'a [u8], bit_len: usize) -> Option<Self> {
        if bit_len > data.len() * BITS_PER_BYTE {
            return None;
        }
        Some(Self {
            data,
            position: BitPosition::default(),
            bit_len,
        })
    }

    /// Check if the reader has consumed every meaningful bit.
    pub fn eof(&self) -> bool {
        self.position.bit_offset() >= self.bit_len
    }

    /// Number of bits left to read.
    pub fn remaining(&self) -> usize {
        self.bit_len.saturating_sub(self.position.bit_offset())
    }

    /// Read the next bit, or None at the end of the stream.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.eof() {
            return None;
        }
        let byte = *self.data.get(self.position.byte_index)?;
        let bit = (byte >> self.position.bit_index) & 1 == 1;
        self.position.step();
        Some(bit)
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}
