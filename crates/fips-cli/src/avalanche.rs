//! One-bit avalanche measurement for both primitives.

use aes_core::{encrypt_block, expand_key, Aes128Key};
use rand::Rng;
use sha256_core::sha256;

/// Largest random message hashed per sample.
const MAX_MESSAGE_BYTES: usize = 128;

/// Mean number of output bits that changed after flipping one input bit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AvalancheReport {
    pub samples: u64,
    pub aes_mean_bits: f64,
    pub sha256_mean_bits: f64,
}

impl AvalancheReport {
    /// Fraction of the 128 ciphertext bits flipped on average.
    pub fn aes_ratio(&self) -> f64 {
        self.aes_mean_bits / 128.0
    }

    /// Fraction of the 256 digest bits flipped on average.
    pub fn sha256_ratio(&self) -> f64 {
        self.sha256_mean_bits / 256.0
    }
}

fn hamming(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

fn flip_bit(bytes: &mut [u8], bit: usize) {
    bytes[bit / 8] ^= 1 << (bit % 8);
}

/// Runs `samples` trials, each with a fresh key, block and message.
pub fn measure<R: Rng>(rng: &mut R, samples: u64) -> AvalancheReport {
    let mut aes_total = 0u64;
    let mut sha_total = 0u64;

    for _ in 0..samples {
        let key: [u8; 16] = rng.gen();
        let block: [u8; 16] = rng.gen();
        let schedule = expand_key(&Aes128Key::from(key));
        let mut flipped = block;
        flip_bit(&mut flipped, rng.gen_range(0..128));
        let before = encrypt_block(&block, &schedule);
        let after = encrypt_block(&flipped, &schedule);
        aes_total += u64::from(hamming(&before, &after));

        let len = rng.gen_range(1..=MAX_MESSAGE_BYTES);
        let mut message = vec![0u8; len];
        rng.fill(message.as_mut_slice());
        let before = sha256(&message);
        flip_bit(&mut message, rng.gen_range(0..len * 8));
        let after = sha256(&message);
        sha_total += u64::from(hamming(before.as_bytes(), after.as_bytes()));
    }

    let n = samples.max(1) as f64;
    AvalancheReport {
        samples,
        aes_mean_bits: aes_total as f64 / n,
        sha256_mean_bits: sha_total as f64 / n,
    }
}
