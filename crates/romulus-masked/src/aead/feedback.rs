//! The state-feedback transform `rho` and the linear map `G`.
//!
//! `G` is GF(2)-linear, so it is evaluated on each share separately and the
//! unmasked state byte is never formed.

use skinny_core::{Block, BLOCK_BYTES};

use crate::share::MaskedBlock;

/// Direction of the feedback transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Input is plaintext, output is ciphertext.
    Encrypt,
    /// Input is ciphertext, output is plaintext.
    Decrypt,
}

/// `G` on one cell: rotate right by one, then XOR the top bit back in.
#[inline(always)]
pub(crate) const fn g_cell(x: u8) -> u8 {
    (x >> 1) ^ (x & 0x80) ^ (x << 7)
}

/// `G` on a full block.
pub(crate) fn g(block: &Block) -> Block {
    core::array::from_fn(|i| g_cell(block[i]))
}

/// Applies `rho` (or its inverse) to `data` of up to 16 bytes, in place.
///
/// Output byte `i` is `(G(s0)[i] ^ in[i]) ^ G(s1)[i]`; the plaintext byte is
/// folded into share 0. A short block also adds its length to cell 15.
pub(crate) fn feedback(state: &mut MaskedBlock, data: &mut [u8], direction: Direction) {
    debug_assert!(data.len() <= BLOCK_BYTES);
    let g0 = g(state.share(0));
    let g1 = g(state.share(1));
    let len = data.len();
    let s0 = state.share_mut(0);
    for (i, byte) in data.iter_mut().enumerate() {
        let input = *byte;
        let output = (g0[i] ^ input) ^ g1[i];
        *byte = output;
        s0[i] ^= match direction {
            Direction::Encrypt => input,
            Direction::Decrypt => output,
        };
    }
    if len < BLOCK_BYTES {
        s0[BLOCK_BYTES - 1] ^= len as u8;
    }
}
