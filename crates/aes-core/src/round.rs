//! AES round transformations.

use crate::gf::GfConstant::{self, Eleven, Fourteen, Nine, One, Thirteen, Three, Two};
use crate::sbox::{inv_sbox, sbox};
use crate::state::State;

const MIX: [[GfConstant; 4]; 4] = [
    [Two, Three, One, One],
    [One, Two, Three, One],
    [One, One, Two, Three],
    [Three, One, One, Two],
];

const INV_MIX: [[GfConstant; 4]; 4] = [
    [Fourteen, Eleven, Thirteen, Nine],
    [Nine, Fourteen, Eleven, Thirteen],
    [Thirteen, Nine, Fourteen, Eleven],
    [Eleven, Thirteen, Nine, Fourteen],
];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut State) {
    for byte in state.bytes_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut State) {
    for byte in state.bytes_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Rotates row `r` left by `r` positions.
#[inline]
pub fn shift_rows(state: &mut State) {
    for r in 1..4 {
        state.row_mut(r).rotate_left(r);
    }
}

/// Rotates row `r` right by `r` positions.
#[inline]
pub fn inv_shift_rows(state: &mut State) {
    for r in 1..4 {
        state.row_mut(r).rotate_right(r);
    }
}

fn multiply_columns(state: &mut State, matrix: &[[GfConstant; 4]; 4]) {
    for c in 0..4 {
        let column = state.column(c);
        let mixed = core::array::from_fn(|r| {
            matrix[r]
                .iter()
                .zip(column)
                .fold(0u8, |acc, (k, byte)| acc ^ k.apply(byte))
        });
        state.set_column(c, mixed);
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut State) {
    multiply_columns(state, &MIX);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut State) {
    multiply_columns(state, &INV_MIX);
}

/// XORs four round-key words into the state, word `c` into column `c`.
#[inline]
pub fn add_round_key(state: &mut State, words: &[u32]) {
    for (c, word) in words.iter().enumerate() {
        let mut column = state.column(c);
        for (byte, k) in column.iter_mut().zip(word.to_be_bytes()) {
            *byte ^= k;
        }
        state.set_column(c, column);
    }
}
