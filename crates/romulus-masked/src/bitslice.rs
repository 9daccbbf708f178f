//! Bit-plane representation of a SKINNY state and its linear layer.
//!
//! Plane `j` holds bit `j` of every cell: lane `i` of the plane is cell `i` of
//! the row-major state. Cell permutations then become fixed shift-and-mask
//! networks on a `u16`, and the S-box becomes a short sequence of plane-wide
//! Boolean operations.

use skinny_core::Block;
use zeroize::Zeroize;

use crate::gadgets::SharedPlane;
use crate::share::MaskedBlock;

/// Eight bit planes, one per cell bit.
pub(crate) type Planes = [u16; 8];

/// Packs a row-major block into bit planes.
pub(crate) fn pack(block: &Block) -> Planes {
    let mut planes = [0u16; 8];
    for (cell, &byte) in block.iter().enumerate() {
        for (bit, plane) in planes.iter_mut().enumerate() {
            *plane |= u16::from((byte >> bit) & 1) << cell;
        }
    }
    planes
}

/// Inverse of [`pack`].
pub(crate) fn unpack(planes: &Planes) -> Block {
    let mut block = [0u8; 16];
    for (cell, byte) in block.iter_mut().enumerate() {
        for (bit, &plane) in planes.iter().enumerate() {
            *byte |= (((plane >> cell) & 1) as u8) << bit;
        }
    }
    block
}

/// ShiftRows on one plane: row `r` rotates right by `r` cells.
#[inline(always)]
pub(crate) const fn shift_rows(p: u16) -> u16 {
    (p & 0x000f)
        | ((p << 1) & 0x00e0)
        | ((p >> 3) & 0x0010)
        | ((p << 2) & 0x0c00)
        | ((p >> 2) & 0x0300)
        | ((p << 3) & 0x8000)
        | ((p >> 1) & 0x7000)
}

/// MixColumns on one plane; each nibble is one row.
#[inline(always)]
pub(crate) const fn mix_columns(p: u16) -> u16 {
    let r0 = p & 0xf;
    let r1 = (p >> 4) & 0xf;
    let r2 = (p >> 8) & 0xf;
    let r3 = (p >> 12) & 0xf;
    (r0 ^ r2 ^ r3) | (r0 << 4) | ((r1 ^ r2) << 8) | ((r0 ^ r2) << 12)
}

/// A masked state in bit-plane form.
#[derive(Clone, Copy, Default, Zeroize)]
pub(crate) struct SlicedState {
    pub(crate) planes: [SharedPlane; 8],
}

impl SlicedState {
    /// Repacks both shares of `block`, one share at a time.
    pub(crate) fn pack(block: &MaskedBlock) -> Self {
        let mut s0 = pack(block.share(0));
        let mut s1 = pack(block.share(1));
        let mut state = Self::default();
        for (j, plane) in state.planes.iter_mut().enumerate() {
            *plane = SharedPlane::new(s0[j], s1[j]);
        }
        s0.zeroize();
        s1.zeroize();
        state
    }

    /// Writes both shares back to row-major form.
    pub(crate) fn unpack_into(&self, block: &mut MaskedBlock) {
        let mut s0 = [0u16; 8];
        let mut s1 = [0u16; 8];
        for (j, plane) in self.planes.iter().enumerate() {
            s0[j] = plane.share0();
            s1[j] = plane.share1();
        }
        *block.share_mut(0) = unpack(&s0);
        *block.share_mut(1) = unpack(&s1);
        s0.zeroize();
        s1.zeroize();
    }
}
