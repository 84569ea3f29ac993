//! SHA-256 compression function (FIPS 180-4 §6.2.2).

use crate::consts::{BLOCK_BYTES, K};

#[inline(always)]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline(always)]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Expands a block into its 64-word message schedule.
///
/// The first 16 words are the block read as big-endian words regardless of
/// host byte order.
pub fn message_schedule(block: &[u8; BLOCK_BYTES]) -> [u32; 64] {
    let mut w = [0u32; 64];
    for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for t in 16..64 {
        w[t] = small_sigma1(w[t - 2])
            .wrapping_add(w[t - 7])
            .wrapping_add(small_sigma0(w[t - 15]))
            .wrapping_add(w[t - 16]);
    }
    w
}

/// Folds one block into the chaining state.
pub fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_BYTES]) {
    let w = message_schedule(block);
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (k, wt) in K.iter().zip(w.iter()) {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(*k)
            .wrapping_add(*wt);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s = s.wrapping_add(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::IV;

    fn abc_block() -> [u8; BLOCK_BYTES] {
        let mut block = [0u8; BLOCK_BYTES];
        block[..3].copy_from_slice(b"abc");
        block[3] = 0x80;
        block[63] = 24;
        block
    }

    #[test]
    fn logical_functions() {
        assert_eq!(ch(0xffff_0000, 0x1234_5678, 0x9abc_def0), 0x1234_def0);
        assert_eq!(maj(0xff00_ff00, 0x0f0f_0f0f, 0x00ff_00ff), 0x0f0f_0f0f);
        assert_eq!(small_sigma0(1), 0x0200_4000);
        assert_eq!(small_sigma1(1), 0x0000_a000);
    }

    #[test]
    fn message_schedule_for_abc() {
        let w = message_schedule(&abc_block());
        assert_eq!(w[0], 0x6162_6380);
        assert_eq!(w[15], 0x0000_0018);
        assert_eq!(w[16], 0x6162_6380);
        assert_eq!(w[17], 0x000f_0000);
        assert_eq!(w[63], 0x12b1_edeb);
    }

    #[test]
    fn single_block_compression_for_abc() {
        let mut state = IV;
        compress(&mut state, &abc_block());
        assert_eq!(
            state,
            [
                0xba7816bf, 0x8f01cfea, 0x414140de, 0x5dae2223, 0xb00361a3, 0x96177a9c, 0xb410ff61,
                0xf20015ad,
            ]
        );
    }

    #[test]
    fn compression_depends_on_order() {
        let first = abc_block();
        let second = [0x5au8; BLOCK_BYTES];

        let mut forward = IV;
        compress(&mut forward, &first);
        compress(&mut forward, &second);

        let mut reversed = IV;
        compress(&mut reversed, &second);
        compress(&mut reversed, &first);

        assert_ne!(forward, reversed);
    }
}
