//! Block accumulator shared by the in-memory and file entry points.

use crate::compress::compress;
use crate::consts::{BLOCK_BYTES, IV};
use crate::digest::Digest;
use crate::error::{Result, Sha256Error};
use crate::pad::PaddedTail;

/// Chaining state of one SHA-256 computation.
///
/// Blocks are folded strictly in order; [`Sha256::finalize`] consumes the
/// accumulator so a state is never reused for a second message.
#[derive(Clone, Debug)]
pub struct Sha256 {
    state: [u32; 8],
    blocks: u64,
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sha256 {
    /// Starts a computation from the standard initial hash value.
    pub fn new() -> Self {
        Self {
            state: IV,
            blocks: 0,
        }
    }

    /// Folds one full 64-byte block into the state.
    #[inline]
    pub fn ingest_block(&mut self, block: &[u8; BLOCK_BYTES]) {
        compress(&mut self.state, block);
        self.blocks += 1;
    }

    /// Number of blocks folded so far.
    pub fn blocks_ingested(&self) -> u64 {
        self.blocks
    }

    /// Folds every full block of `data`, returning the unconsumed remainder.
    pub(crate) fn ingest_full_blocks<'a>(&mut self, data: &'a [u8]) -> &'a [u8] {
        let mut chunks = data.chunks_exact(BLOCK_BYTES);
        for chunk in &mut chunks {
            let mut block = [0u8; BLOCK_BYTES];
            block.copy_from_slice(chunk);
            self.ingest_block(&block);
        }
        chunks.remainder()
    }

    /// Pads the trailing partial block and returns the digest.
    ///
    /// `tail` holds the bytes after the last ingested block and must be shorter
    /// than 64 bytes.
    pub fn finalize(self, tail: &[u8]) -> Result<Digest> {
        if tail.len() >= BLOCK_BYTES {
            return Err(Sha256Error::TailTooLong { len: tail.len() });
        }
        Ok(self.finish(tail))
    }

    pub(crate) fn finish(self, tail: &[u8]) -> Digest {
        let total_len = self
            .blocks
            .wrapping_mul(BLOCK_BYTES as u64)
            .wrapping_add(tail.len() as u64);
        let padded = PaddedTail::build(tail, total_len);

        let mut state = self.state;
        for block in padded.blocks() {
            compress(&mut state, block);
        }
        Digest::from_words(state)
    }
}

/// Hashes an in-memory buffer.
pub fn sha256(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    let tail = hasher.ingest_full_blocks(data);
    hasher.finish(tail)
}

/// Hashes an in-memory buffer and renders the digest as 64 lowercase hex characters.
pub fn sha256_of_bytes(data: &[u8]) -> String {
    sha256(data).to_hex()
}
