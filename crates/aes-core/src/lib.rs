//! AES-128 block cipher following FIPS-197.
//!
//! This crate provides:
//! - GF(2^8) arithmetic restricted to the MixColumns multipliers.
//! - Forward/inverse S-boxes and the AES-128 key schedule.
//! - Single-block encryption, decryption, and the equivalent inverse cipher.
//! - Optional round checkpoints ([`RoundObserver`]) for comparing against the
//!   published round-by-round listings.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it should not be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod error;
pub mod gf;
mod key;
mod round;
mod sbox;
mod state;
mod trace;

pub use crate::block::{block_from_slice, Block};
pub use crate::cipher::{
    aes128_decrypt, aes128_decrypt_equivalent, aes128_decrypt_equivalent_with,
    aes128_decrypt_with, aes128_encrypt, aes128_encrypt_with, decrypt_block,
    decrypt_block_equivalent, decrypt_block_equivalent_with, decrypt_block_with, encrypt_block,
    encrypt_block_with, expand_decryption_key, expand_key,
};
pub use crate::error::{AesError, Result};
pub use crate::gf::GfConstant;
pub use crate::key::{Aes128Key, KeySchedule, ROUNDS, SCHEDULE_WORDS};
pub use crate::sbox::{inv_sbox, sbox, INV_SBOX, RCON, SBOX};
pub use crate::state::State;
pub use crate::trace::{
    Checkpoint, NoopObserver, RecordingObserver, RoundObserver, Stage, TracingObserver,
};
