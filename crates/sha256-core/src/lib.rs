//! SHA-256 following FIPS 180-4.
//!
//! Messages are processed as a sequential fold of 64-byte blocks through the
//! compression function. [`Sha256`] exposes that fold directly ("ingest a
//! block", "finalize with the trailing bytes"); [`sha256`] and
//! [`sha256_of_file`] are thin drivers over it, the latter streaming full
//! blocks so arbitrarily large files hash in bounded memory.
//!
//! Word packing is always big-endian and independent of the host byte order.
//! Like `aes-core`, the implementation is not constant-time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compress;
mod consts;
mod digest;
mod error;
mod file;
mod hasher;
mod pad;

pub use crate::compress::{compress, message_schedule};
pub use crate::consts::{BLOCK_BYTES, DIGEST_BYTES, IV, K};
pub use crate::digest::Digest;
pub use crate::error::{Result, Sha256Error};
pub use crate::file::{
    sha256_of_file, sha256_of_file_with, sha256_of_reader, FileHashConfig,
    DEFAULT_READ_BUFFER_BLOCKS,
};
pub use crate::hasher::{sha256, sha256_of_bytes, Sha256};
pub use crate::pad::{pad_tail, padded_len, PaddedTail};
