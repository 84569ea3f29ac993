//! Key types for AES-128.

use crate::block::Block;
use crate::error::AesError;

/// Number of rounds for a 128-bit key.
pub const ROUNDS: usize = 10;

/// Number of 32-bit words in an expanded AES-128 key.
pub const SCHEDULE_WORDS: usize = 4 * (ROUNDS + 1);

/// AES-128 key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aes128Key(pub [u8; 16]);

impl From<[u8; 16]> for Aes128Key {
    fn from(value: [u8; 16]) -> Self {
        Self(value)
    }
}

impl TryFrom<&[u8]> for Aes128Key {
    type Error = AesError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        value
            .try_into()
            .map(Self)
            .map_err(|_| AesError::InvalidKeyLength { len: value.len() })
    }
}

/// Expanded key: 44 big-endian words, four per round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySchedule(pub(crate) [u32; SCHEDULE_WORDS]);

impl KeySchedule {
    /// All schedule words.
    #[inline]
    pub fn words(&self) -> &[u32; SCHEDULE_WORDS] {
        &self.0
    }

    /// Word `i` of the schedule.
    #[inline]
    pub fn word(&self, i: usize) -> u32 {
        self.0[i]
    }

    /// The four words used by `round` (0..=10).
    #[inline]
    pub fn round_words(&self, round: usize) -> &[u32] {
        &self.0[round * 4..round * 4 + 4]
    }

    /// Round key `round` laid out as a block, word `c` filling bytes `4c..4c+4`.
    pub fn round_key(&self, round: usize) -> Block {
        let mut out = [0u8; 16];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.round_words(round)) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_from_slice_checks_length() {
        let bytes = [1u8; 16];
        assert_eq!(Aes128Key::try_from(&bytes[..]), Ok(Aes128Key(bytes)));
        assert_eq!(
            Aes128Key::try_from(&bytes[..8]),
            Err(AesError::InvalidKeyLength { len: 8 })
        );
        assert_eq!(
            Aes128Key::try_from(&[0u8; 24][..]),
            Err(AesError::InvalidKeyLength { len: 24 })
        );
    }

    #[test]
    fn round_key_is_big_endian() {
        let mut words = [0u32; SCHEDULE_WORDS];
        words[4] = 0x0011_2233;
        words[7] = 0xccdd_eeff;
        let schedule = KeySchedule(words);
        let rk = schedule.round_key(1);
        assert_eq!(&rk[..4], &[0x00, 0x11, 0x22, 0x33]);
        assert_eq!(&rk[12..], &[0xcc, 0xdd, 0xee, 0xff]);
        assert_eq!(schedule.round_key(0), [0u8; 16]);
    }
}
