//! AES-128 key schedule and block encryption/decryption.

use crate::block::{block_from_slice, Block};
use crate::error::Result;
use crate::key::{Aes128Key, KeySchedule, ROUNDS, SCHEDULE_WORDS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::sbox::{sbox, RCON};
use crate::state::State;
use crate::trace::{NoopObserver, RoundObserver, Stage};

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Expands a 128-bit key into the 44-word schedule.
pub fn expand_key(key: &Aes128Key) -> KeySchedule {
    let mut w = [0u32; SCHEDULE_WORDS];
    for (word, chunk) in w.iter_mut().zip(key.0.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    for i in 4..SCHEDULE_WORDS {
        let mut temp = w[i - 1];
        if i % 4 == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[(i / 4) - 1]) << 24);
        }
        w[i] = w[i - 4] ^ temp;
    }

    KeySchedule(w)
}

/// Derives the schedule for the equivalent inverse cipher: round keys 1..=9 pass
/// through InvMixColumns, the first and last are copied unchanged.
pub fn expand_decryption_key(schedule: &KeySchedule) -> KeySchedule {
    let mut dw = schedule.0;
    for round in 1..ROUNDS {
        let mut state = State::from_block(&schedule.round_key(round));
        inv_mix_columns(&mut state);
        let bytes = state.to_block();
        for (word, chunk) in dw[round * 4..round * 4 + 4]
            .iter_mut()
            .zip(bytes.chunks_exact(4))
        {
            *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
    }
    KeySchedule(dw)
}

/// Encrypts a single 16-byte block with a pre-expanded key schedule.
pub fn encrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    encrypt_block_with(block, schedule, &mut NoopObserver)
}

/// Encrypts a block, reporting every checkpoint to `observer`.
pub fn encrypt_block_with<O: RoundObserver + ?Sized>(
    block: &Block,
    schedule: &KeySchedule,
    observer: &mut O,
) -> Block {
    observer.checkpoint(0, Stage::Input, block);
    let mut state = State::from_block(block);

    observer.checkpoint(0, Stage::RoundKey, &schedule.round_key(0));
    add_round_key(&mut state, schedule.round_words(0));

    for round in 1..=ROUNDS {
        observer.checkpoint(round, Stage::Start, &state.to_block());
        sub_bytes(&mut state);
        observer.checkpoint(round, Stage::SubBytes, &state.to_block());
        shift_rows(&mut state);
        observer.checkpoint(round, Stage::ShiftRows, &state.to_block());
        if round < ROUNDS {
            mix_columns(&mut state);
            observer.checkpoint(round, Stage::MixColumns, &state.to_block());
        }
        observer.checkpoint(round, Stage::RoundKey, &schedule.round_key(round));
        add_round_key(&mut state, schedule.round_words(round));
    }

    let out = state.to_block();
    observer.checkpoint(ROUNDS, Stage::Output, &out);
    out
}

/// Decrypts a single 16-byte block with a pre-expanded key schedule.
pub fn decrypt_block(block: &Block, schedule: &KeySchedule) -> Block {
    decrypt_block_with(block, schedule, &mut NoopObserver)
}

/// Decrypts a block with the straightforward inverse cipher, reporting checkpoints.
///
/// Checkpoint rounds count upwards (`ROUNDS - round`) as in the published listings.
pub fn decrypt_block_with<O: RoundObserver + ?Sized>(
    block: &Block,
    schedule: &KeySchedule,
    observer: &mut O,
) -> Block {
    observer.checkpoint(0, Stage::InvInput, block);
    let mut state = State::from_block(block);

    observer.checkpoint(0, Stage::InvRoundKey, &schedule.round_key(ROUNDS));
    add_round_key(&mut state, schedule.round_words(ROUNDS));

    for round in (0..ROUNDS).rev() {
        let step = ROUNDS - round;
        observer.checkpoint(step, Stage::InvStart, &state.to_block());
        inv_shift_rows(&mut state);
        observer.checkpoint(step, Stage::InvShiftRows, &state.to_block());
        inv_sub_bytes(&mut state);
        observer.checkpoint(step, Stage::InvSubBytes, &state.to_block());
        observer.checkpoint(step, Stage::InvRoundKey, &schedule.round_key(round));
        add_round_key(&mut state, schedule.round_words(round));
        observer.checkpoint(step, Stage::InvAddRoundKey, &state.to_block());
        if round > 0 {
            inv_mix_columns(&mut state);
        }
    }

    let out = state.to_block();
    observer.checkpoint(ROUNDS, Stage::InvOutput, &out);
    out
}

/// Decrypts a block with the equivalent inverse cipher.
///
/// `decryption_schedule` must come from [`expand_decryption_key`].
pub fn decrypt_block_equivalent(block: &Block, decryption_schedule: &KeySchedule) -> Block {
    decrypt_block_equivalent_with(block, decryption_schedule, &mut NoopObserver)
}

/// Equivalent inverse cipher with checkpoints.
pub fn decrypt_block_equivalent_with<O: RoundObserver + ?Sized>(
    block: &Block,
    decryption_schedule: &KeySchedule,
    observer: &mut O,
) -> Block {
    observer.checkpoint(0, Stage::InvInput, block);
    let mut state = State::from_block(block);

    observer.checkpoint(0, Stage::InvRoundKey, &decryption_schedule.round_key(ROUNDS));
    add_round_key(&mut state, decryption_schedule.round_words(ROUNDS));

    for round in (0..ROUNDS).rev() {
        let step = ROUNDS - round;
        observer.checkpoint(step, Stage::InvStart, &state.to_block());
        inv_sub_bytes(&mut state);
        observer.checkpoint(step, Stage::InvSubBytes, &state.to_block());
        inv_shift_rows(&mut state);
        observer.checkpoint(step, Stage::InvShiftRows, &state.to_block());
        if round > 0 {
            inv_mix_columns(&mut state);
            observer.checkpoint(step, Stage::InvMixColumns, &state.to_block());
        }
        observer.checkpoint(step, Stage::InvRoundKey, &decryption_schedule.round_key(round));
        add_round_key(&mut state, decryption_schedule.round_words(round));
    }

    let out = state.to_block();
    observer.checkpoint(ROUNDS, Stage::InvOutput, &out);
    out
}

/// Encrypts a 16-byte `plaintext` under a 16-byte `key`.
///
/// A fresh key schedule is derived for every call.
pub fn aes128_encrypt(plaintext: &[u8], key: &[u8]) -> Result<Block> {
    aes128_encrypt_with(plaintext, key, &mut NoopObserver)
}

/// [`aes128_encrypt`] with round checkpoints reported to `observer`.
pub fn aes128_encrypt_with<O: RoundObserver + ?Sized>(
    plaintext: &[u8],
    key: &[u8],
    observer: &mut O,
) -> Result<Block> {
    let block = block_from_slice(plaintext)?;
    let key = Aes128Key::try_from(key)?;
    Ok(encrypt_block_with(&block, &expand_key(&key), observer))
}

/// Decrypts a 16-byte `ciphertext` under a 16-byte `key`.
pub fn aes128_decrypt(ciphertext: &[u8], key: &[u8]) -> Result<Block> {
    aes128_decrypt_with(ciphertext, key, &mut NoopObserver)
}

/// [`aes128_decrypt`] with round checkpoints reported to `observer`.
pub fn aes128_decrypt_with<O: RoundObserver + ?Sized>(
    ciphertext: &[u8],
    key: &[u8],
    observer: &mut O,
) -> Result<Block> {
    let block = block_from_slice(ciphertext)?;
    let key = Aes128Key::try_from(key)?;
    Ok(decrypt_block_with(&block, &expand_key(&key), observer))
}

/// Decrypts using the equivalent inverse cipher; same result as [`aes128_decrypt`].
pub fn aes128_decrypt_equivalent(ciphertext: &[u8], key: &[u8]) -> Result<Block> {
    aes128_decrypt_equivalent_with(ciphertext, key, &mut NoopObserver)
}

/// [`aes128_decrypt_equivalent`] with round checkpoints reported to `observer`.
pub fn aes128_decrypt_equivalent_with<O: RoundObserver + ?Sized>(
    ciphertext: &[u8],
    key: &[u8],
    observer: &mut O,
) -> Result<Block> {
    let block = block_from_slice(ciphertext)?;
    let key = Aes128Key::try_from(key)?;
    let dks = expand_decryption_key(&expand_key(&key));
    Ok(decrypt_block_equivalent_with(&block, &dks, observer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AesError;
    use crate::key::Aes128Key;
    use crate::trace::RecordingObserver;
    use proptest::{arbitrary::any, proptest};
    use rand::RngCore;

    const NIST_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];
    const NIST_PLAIN: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee,
        0xff,
    ];
    const NIST_CIPHER: [u8; 16] = [
        0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5,
        0x5a,
    ];

    fn hex_block(s: &str) -> Block {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    #[test]
    fn key_expansion_matches_fips_appendix_a() {
        let key = Aes128Key::from(hex_block("2b7e151628aed2a6abf7158809cf4f3c"));
        let ks = expand_key(&key);
        assert_eq!(ks.word(0), 0x2b7e1516);
        assert_eq!(ks.word(3), 0x09cf4f3c);
        assert_eq!(ks.word(4), 0xa0fafe17);
        assert_eq!(ks.word(5), 0x88542cb1);
        assert_eq!(ks.word(43), 0xb6630ca6);
    }

    #[test]
    fn key_expansion_for_nist_key() {
        let ks = expand_key(&Aes128Key::from(NIST_KEY));
        assert_eq!(ks.round_key(0), NIST_KEY);
        assert_eq!(
            ks.round_key(1),
            hex_block("d6aa74fdd2af72fadaa678f1d6ab76fe")
        );
        assert_eq!(
            ks.round_key(10),
            hex_block("13111d7fe3944a17f307a78b4d2b30c5")
        );
    }

    #[test]
    fn encrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let schedule = expand_key(&key);
        let ct = encrypt_block(&NIST_PLAIN, &schedule);
        assert_eq!(ct, NIST_CIPHER);
    }

    #[test]
    fn decrypt_matches_nist_vector() {
        let key = Aes128Key::from(NIST_KEY);
        let schedule = expand_key(&key);
        let pt = decrypt_block(&NIST_CIPHER, &schedule);
        assert_eq!(pt, NIST_PLAIN);
    }

    #[test]
    fn fips_appendix_b_vector() {
        let ct = aes128_encrypt(
            &hex_block("3243f6a8885a308d313198a2e0370734"),
            &hex_block("2b7e151628aed2a6abf7158809cf4f3c"),
        )
        .unwrap();
        assert_eq!(ct, hex_block("3925841d02dc09fbdc118597196a0b32"));
    }

    #[test]
    fn slice_api_rejects_bad_lengths() {
        assert_eq!(
            aes128_encrypt(&NIST_PLAIN[..15], &NIST_KEY),
            Err(AesError::InvalidBlockLength { len: 15 })
        );
        assert_eq!(
            aes128_encrypt(&NIST_PLAIN, &[0u8; 32]),
            Err(AesError::InvalidKeyLength { len: 32 })
        );
        assert_eq!(
            aes128_decrypt(&[], &NIST_KEY),
            Err(AesError::InvalidBlockLength { len: 0 })
        );
        assert_eq!(
            aes128_decrypt_equivalent(&NIST_CIPHER, &NIST_KEY[..4]),
            Err(AesError::InvalidKeyLength { len: 4 })
        );
    }

    #[test]
    fn slice_api_matches_nist_vector() {
        assert_eq!(aes128_encrypt(&NIST_PLAIN, &NIST_KEY), Ok(NIST_CIPHER));
        assert_eq!(aes128_decrypt(&NIST_CIPHER, &NIST_KEY), Ok(NIST_PLAIN));
        assert_eq!(
            aes128_decrypt_equivalent(&NIST_CIPHER, &NIST_KEY),
            Ok(NIST_PLAIN)
        );
    }

    #[test]
    fn encrypt_trace_matches_appendix_c() {
        let mut rec = RecordingObserver::new();
        aes128_encrypt_with(&NIST_PLAIN, &NIST_KEY, &mut rec).unwrap();
        let lines: Vec<String> = rec.lines().collect();
        assert_eq!(lines.len(), 52);
        assert_eq!(lines[0], "round[ 0].input    00112233445566778899aabbccddeeff");
        assert_eq!(lines[1], "round[ 0].k_sch    000102030405060708090a0b0c0d0e0f");
        assert_eq!(lines[2], "round[ 1].start    00102030405060708090a0b0c0d0e0f0");
        assert_eq!(lines[3], "round[ 1].s_box    63cab7040953d051cd60e0e7ba70e18c");
        assert_eq!(lines[4], "round[ 1].s_row    6353e08c0960e104cd70b751bacad0e7");
        assert_eq!(lines[5], "round[ 1].m_col    5f72641557f5bc92f7be3b291db9f91a");
        assert_eq!(lines[6], "round[ 1].k_sch    d6aa74fdd2af72fadaa678f1d6ab76fe");
        assert_eq!(lines[7], "round[ 2].start    89d810e8855ace682d1843d8cb128fe4");
        assert_eq!(lines[51], "round[10].output   69c4e0d86a7b0430d8cdb78070b4c55a");
        assert!(rec.find(10, Stage::MixColumns).is_none());
    }

    #[test]
    fn decrypt_trace_matches_appendix_c() {
        let mut rec = RecordingObserver::new();
        aes128_decrypt_with(&NIST_CIPHER, &NIST_KEY, &mut rec).unwrap();
        assert_eq!(rec.entries().len(), 53);
        let at = |round, stage| rec.find(round, stage).map(|c| hex::encode(c.bytes));
        assert_eq!(
            at(0, Stage::InvRoundKey).as_deref(),
            Some("13111d7fe3944a17f307a78b4d2b30c5")
        );
        assert_eq!(
            at(1, Stage::InvStart).as_deref(),
            Some("7ad5fda789ef4e272bca100b3d9ff59f")
        );
        assert_eq!(
            at(1, Stage::InvShiftRows).as_deref(),
            Some("7a9f102789d5f50b2beffd9f3dca4ea7")
        );
        assert_eq!(
            at(1, Stage::InvSubBytes).as_deref(),
            Some("bd6e7c3df2b5779e0b61216e8b10b689")
        );
        assert_eq!(
            at(1, Stage::InvRoundKey).as_deref(),
            Some("549932d1f08557681093ed9cbe2c974e")
        );
        assert_eq!(
            at(1, Stage::InvAddRoundKey).as_deref(),
            Some("e9f74eec023020f61bf2ccf2353c21c7")
        );
        assert_eq!(
            at(10, Stage::InvOutput).as_deref(),
            Some("00112233445566778899aabbccddeeff")
        );
    }

    #[test]
    fn equivalent_inverse_trace_matches_appendix_c() {
        let mut rec = RecordingObserver::new();
        aes128_decrypt_equivalent_with(&NIST_CIPHER, &NIST_KEY, &mut rec).unwrap();
        let at = |round, stage| rec.find(round, stage).map(|c| hex::encode(c.bytes));
        assert_eq!(
            at(1, Stage::InvSubBytes).as_deref(),
            Some("bdb52189f261b63d0b107c9e8b6e776e")
        );
        assert_eq!(
            at(1, Stage::InvMixColumns).as_deref(),
            Some("4773b91ff72f354361cb018ea1e6cf2c")
        );
        assert_eq!(
            at(1, Stage::InvRoundKey).as_deref(),
            Some("13aa29be9c8faff6f770f58000f7bf03")
        );
        assert!(at(10, Stage::InvMixColumns).is_none());
        assert_eq!(
            at(10, Stage::InvOutput).as_deref(),
            Some("00112233445566778899aabbccddeeff")
        );
    }

    #[test]
    fn decryption_schedule_keeps_outer_round_keys() {
        let ks = expand_key(&Aes128Key::from(NIST_KEY));
        let dks = expand_decryption_key(&ks);
        assert_eq!(dks.round_key(0), ks.round_key(0));
        assert_eq!(dks.round_key(10), ks.round_key(10));
        assert_eq!(
            dks.round_key(9),
            hex_block("13aa29be9c8faff6f770f58000f7bf03")
        );
        assert_eq!(
            dks.round_key(1),
            hex_block("8c56dff0825dd3f9805ad3fc8659d7fd")
        );
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut key_bytes = [0u8; 16];
            let mut block = [0u8; 16];
            rng.fill_bytes(&mut key_bytes);
            rng.fill_bytes(&mut block);
            let key = Aes128Key::from(key_bytes);
            let ks = expand_key(&key);
            let ct = encrypt_block(&block, &ks);
            let pt = decrypt_block(&ct, &ks);
            assert_eq!(pt, block);
        }
    }

    proptest! {
        #[test]
        fn equivalent_inverse_agrees(block in any::<[u8; 16]>(), key in any::<[u8; 16]>()) {
            let ks = expand_key(&Aes128Key::from(key));
            let dks = expand_decryption_key(&ks);
            let ct = encrypt_block(&block, &ks);
            assert_eq!(decrypt_block_equivalent(&ct, &dks), decrypt_block(&ct, &ks));
            assert_eq!(decrypt_block_equivalent(&ct, &dks), block);
        }

        #[test]
        fn matches_rustcrypto_aes(block in any::<[u8; 16]>(), key in any::<[u8; 16]>()) {
            use aes::cipher::{generic_array::GenericArray, BlockEncrypt, KeyInit};

            let reference = aes::Aes128::new(&GenericArray::from(key));
            let mut expected = GenericArray::from(block);
            reference.encrypt_block(&mut expected);

            let ours = encrypt_block(&block, &expand_key(&Aes128Key::from(key)));
            assert_eq!(ours.as_slice(), expected.as_slice());
        }
    }
}
