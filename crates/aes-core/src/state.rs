//! The 4×4 state matrix.

use crate::block::Block;

/// AES state: byte `i` of a block sits at row `i % 4`, column `i / 4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct State([[u8; 4]; 4]);

impl State {
    /// Loads a block in column-major order.
    pub fn from_block(block: &Block) -> Self {
        let mut rows = [[0u8; 4]; 4];
        for (i, &byte) in block.iter().enumerate() {
            rows[i % 4][i / 4] = byte;
        }
        Self(rows)
    }

    /// Reads the state back into a block using the same mapping as [`State::from_block`].
    pub fn to_block(&self) -> Block {
        let mut block = [0u8; 16];
        for (i, byte) in block.iter_mut().enumerate() {
            *byte = self.0[i % 4][i / 4];
        }
        block
    }

    /// Row `r` of the matrix.
    #[inline]
    pub fn row(&self, r: usize) -> &[u8; 4] {
        &self.0[r]
    }

    /// Mutable row `r` of the matrix.
    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [u8; 4] {
        &mut self.0[r]
    }

    /// Column `c` as a top-to-bottom array.
    #[inline]
    pub fn column(&self, c: usize) -> [u8; 4] {
        [self.0[0][c], self.0[1][c], self.0[2][c], self.0[3][c]]
    }

    /// Overwrites column `c`.
    #[inline]
    pub fn set_column(&mut self, c: usize, column: [u8; 4]) {
        for (row, byte) in self.0.iter_mut().zip(column) {
            row[c] = byte;
        }
    }

    /// Iterates over every byte mutably, row by row.
    pub fn bytes_mut(&mut self) -> impl Iterator<Item = &mut u8> {
        self.0.iter_mut().flatten()
    }
}

impl From<Block> for State {
    fn from(block: Block) -> Self {
        Self::from_block(&block)
    }
}

impl From<State> for Block {
    fn from(state: State) -> Self {
        state.to_block()
    }
}
