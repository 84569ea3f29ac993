//! Encrypts a random block, decrypts it both ways and hashes it incrementally.

use aes_core::{
    decrypt_block, decrypt_block_equivalent, encrypt_block, expand_decryption_key, expand_key,
    Aes128Key,
};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha256_core::{sha256, Sha256};

fn main() -> anyhow::Result<()> {
    // Deterministic seed for reproducibility in the example.
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut key = [0u8; 16];
    let mut block = [0u8; 16];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut block);

    let schedule = expand_key(&Aes128Key::from(key));
    let ciphertext = encrypt_block(&block, &schedule);
    assert_eq!(decrypt_block(&ciphertext, &schedule), block);
    assert_eq!(
        decrypt_block_equivalent(&ciphertext, &expand_decryption_key(&schedule)),
        block
    );

    let mut message = vec![0u8; 200];
    rng.fill_bytes(&mut message);
    let mut hasher = Sha256::new();
    let mut blocks = message.chunks_exact(64);
    for chunk in &mut blocks {
        let mut full = [0u8; 64];
        full.copy_from_slice(chunk);
        hasher.ingest_block(&full);
    }
    let digest = hasher.finalize(blocks.remainder())?;
    assert_eq!(digest, sha256(&message));

    println!("ciphertext: {}", hex::encode(ciphertext));
    println!("sha256: {digest}");
    println!("example succeeded; both inverse ciphers and the incremental hash agree");
    Ok(())
}
