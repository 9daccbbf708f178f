//! Block representation helpers.

/// Number of bytes in a SKINNY-128 block.
pub const BLOCK_BYTES: usize = 16;

/// SKINNY-128 block of 16 cells, stored row-major.
pub type Block = [u8; BLOCK_BYTES];

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
