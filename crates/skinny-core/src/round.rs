//! SKINNY-128 round transformations.

use crate::block::Block;
use crate::sbox::sbox;

/// Applies SubCells to the state in place.
#[inline]
pub fn sub_cells(state: &mut Block) {
    for cell in state.iter_mut() {
        *cell = sbox(*cell);
    }
}

/// Adds the 6-bit round constant: `c0` to cell 0, `c1` to cell 4 and `0x2` to cell 8.
#[inline]
pub fn add_constants(state: &mut Block, rc: u8) {
    state[0] ^= rc & 0x0f;
    state[4] ^= (rc >> 4) & 0x03;
    state[8] ^= 0x02;
}

/// XORs the round tweakey into the first two rows of the state.
#[inline]
pub fn add_round_tweakey(state: &mut Block, round_tweakey: &[u8; 8]) {
    for (cell, rtk) in state.iter_mut().zip(round_tweakey.iter()) {
        *cell ^= *rtk;
    }
}

/// Performs ShiftRows in place: row `r` rotates right by `r` cells.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let mut tmp = [0u8; 16];
    tmp[0] = state[0];
    tmp[1] = state[1];
    tmp[2] = state[2];
    tmp[3] = state[3];

    tmp[4] = state[7];
    tmp[5] = state[4];
    tmp[6] = state[5];
    tmp[7] = state[6];

    tmp[8] = state[10];
    tmp[9] = state[11];
    tmp[10] = state[8];
    tmp[11] = state[9];

    tmp[12] = state[13];
    tmp[13] = state[14];
    tmp[14] = state[15];
    tmp[15] = state[12];

    *state = tmp;
}

fn mix_single_column(col: &mut [u8; 4]) {
    let [a0, a1, a2, a3] = *col;
    col[0] = a0 ^ a2 ^ a3;
    col[1] = a0;
    col[2] = a1 ^ a2;
    col[3] = a0 ^ a2;
}

/// MixColumns over all four columns (binary matrix, no field multiplication).
#[inline]
pub fn mix_columns(state: &mut Block) {
    for col in 0..4 {
        let mut column = [state[col], state[col + 4], state[col + 8], state[col + 12]];
        mix_single_column(&mut column);
        state[col] = column[0];
        state[col + 4] = column[1];
        state[col + 8] = column[2];
        state[col + 12] = column[3];
    }
}
