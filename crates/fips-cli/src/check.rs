//! Known-answer self checks against the published vectors.

use aes_core::{aes128_decrypt, aes128_decrypt_equivalent, aes128_encrypt};
use anyhow::{Context, Result};
use sha256_core::sha256_of_bytes;

struct AesVector {
    name: &'static str,
    key: &'static str,
    plaintext: &'static str,
    ciphertext: &'static str,
}

const AES_VECTORS: &[AesVector] = &[
    AesVector {
        name: "FIPS-197 C.1",
        key: "000102030405060708090a0b0c0d0e0f",
        plaintext: "00112233445566778899aabbccddeeff",
        ciphertext: "69c4e0d86a7b0430d8cdb78070b4c55a",
    },
    AesVector {
        name: "FIPS-197 B",
        key: "2b7e151628aed2a6abf7158809cf4f3c",
        plaintext: "3243f6a8885a308d313198a2e0370734",
        ciphertext: "3925841d02dc09fbdc118597196a0b32",
    },
];

const SHA256_VECTORS: &[(&str, usize, u8, &str)] = &[
    ("empty", 0, 0, "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
    ("55 x 'a'", 55, b'a', "9f4390f8d30c2dd92ec9f095b65e2b9ae9b0a925a5258e241c9f1e910f734318"),
    ("56 x 'a'", 56, b'a', "b35439a4ac6f0948b6d6f9e3c6af0f5f590ce20f1bde7090ef7970686ec6738a"),
    ("64 x 'a'", 64, b'a', "ffe054fe7ae0cb6dc65c3af9b61d5209f439851db43d0ba5997337df154668eb"),
];

/// Result of one known-answer comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub name: String,
    pub passed: bool,
}

impl Outcome {
    fn new(name: impl Into<String>, passed: bool) -> Self {
        Self {
            name: name.into(),
            passed,
        }
    }
}

/// Runs every vector and reports each comparison.
pub fn run() -> Result<Vec<Outcome>> {
    let mut outcomes = Vec::new();

    for v in AES_VECTORS {
        let key = hex::decode(v.key).context("decode vector key")?;
        let pt = hex::decode(v.plaintext).context("decode vector plaintext")?;
        let ct = hex::decode(v.ciphertext).context("decode vector ciphertext")?;

        let encrypted = aes128_encrypt(&pt, &key)?;
        outcomes.push(Outcome::new(
            format!("aes128 encrypt {}", v.name),
            encrypted[..] == ct[..],
        ));
        let decrypted = aes128_decrypt(&ct, &key)?;
        outcomes.push(Outcome::new(
            format!("aes128 decrypt {}", v.name),
            decrypted[..] == pt[..],
        ));
        let decrypted = aes128_decrypt_equivalent(&ct, &key)?;
        outcomes.push(Outcome::new(
            format!("aes128 equivalent decrypt {}", v.name),
            decrypted[..] == pt[..],
        ));
    }

    outcomes.push(Outcome::new(
        "sha256 \"abc\"",
        sha256_of_bytes(b"abc") == "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    ));
    for &(name, len, byte, expected) in SHA256_VECTORS {
        outcomes.push(Outcome::new(
            format!("sha256 {name}"),
            sha256_of_bytes(&vec![byte; len]) == expected,
        ));
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_vectors_pass() {
        let outcomes = run().unwrap();
        assert_eq!(outcomes.len(), AES_VECTORS.len() * 3 + 1 + SHA256_VECTORS.len());
        for outcome in outcomes {
            assert!(outcome.passed, "{} failed", outcome.name);
        }
    }
}
