//! Message padding (FIPS 180-4 §5.1.1).
//!
//! Only the trailing partial block of a message ever needs padding: every full
//! 64-byte block before it is compressed as-is. Padding appends `0x80`, zero
//! bytes, and the 64-bit big-endian bit length, spilling into a second block
//! when fewer than 9 bytes remain after the tail.

use crate::consts::BLOCK_BYTES;
use crate::error::{Result, Sha256Error};

/// Bytes occupied by the trailing length field.
const LENGTH_BYTES: usize = 8;

/// Largest tail that still fits the marker and length field in one block.
const SINGLE_BLOCK_TAIL: usize = BLOCK_BYTES - LENGTH_BYTES - 1;

/// Total length in bytes after padding a message of `len` bytes.
pub fn padded_len(len: u64) -> u64 {
    let block = BLOCK_BYTES as u64;
    let rem = len % block;
    if rem <= SINGLE_BLOCK_TAIL as u64 {
        len - rem + block
    } else {
        len - rem + 2 * block
    }
}

/// The one or two final blocks produced by padding a tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaddedTail {
    blocks: [[u8; BLOCK_BYTES]; 2],
    count: usize,
}

impl PaddedTail {
    /// Pads a tail already known to be shorter than one block.
    pub(crate) fn build(tail: &[u8], total_len: u64) -> Self {
        let mut blocks = [[0u8; BLOCK_BYTES]; 2];
        blocks[0][..tail.len()].copy_from_slice(tail);
        blocks[0][tail.len()] = 0x80;

        let count = if tail.len() <= SINGLE_BLOCK_TAIL { 1 } else { 2 };
        let bit_len = total_len.wrapping_mul(8);
        blocks[count - 1][BLOCK_BYTES - LENGTH_BYTES..].copy_from_slice(&bit_len.to_be_bytes());

        Self { blocks, count }
    }

    /// The padded blocks, in order.
    pub fn blocks(&self) -> &[[u8; BLOCK_BYTES]] {
        &self.blocks[..self.count]
    }
}

/// Pads the trailing `tail` of a message whose full length is `total_len` bytes.
///
/// `tail` must hold the last `total_len % 64` bytes of the message.
pub fn pad_tail(tail: &[u8], total_len: u64) -> Result<PaddedTail> {
    if tail.len() >= BLOCK_BYTES {
        return Err(Sha256Error::TailTooLong { len: tail.len() });
    }
    Ok(PaddedTail::build(tail, total_len))
}
