//! Error types for SHA-256 hashing.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the hashing entry points.
#[derive(Debug, Error)]
pub enum Sha256Error {
    /// Opening, inspecting, seeking or reading a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being hashed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading from a caller-supplied reader failed.
    #[error("read failed: {0}")]
    Read(#[from] io::Error),

    /// The streaming buffer could not be allocated.
    #[error("failed to allocate read buffer: {0}")]
    Allocation(#[from] TryReserveError),

    /// `finalize` received a full block or more as the trailing partial block.
    #[error("trailing partial block must be shorter than 64 bytes, got {len}")]
    TailTooLong {
        /// Length of the rejected tail.
        len: usize,
    },

    /// The configured read buffer size is zero or overflows.
    #[error("invalid read buffer size of {blocks} blocks")]
    InvalidBufferSize {
        /// Requested buffer size in 64-byte blocks.
        blocks: usize,
    },
}

impl Sha256Error {
    /// Whether the failure came from the environment (I/O) rather than the input.
    pub fn is_io(&self) -> bool {
        matches!(self, Sha256Error::Io { .. } | Sha256Error::Read(_))
    }
}

/// Result alias for hashing operations.
pub type Result<T> = std::result::Result<T, Sha256Error>;
