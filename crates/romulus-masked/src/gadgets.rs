//! Share-wise Boolean gadgets on 16-lane bit planes.
//!
//! Each [`SharedPlane`] carries one bit of every cell of the state (lane `i` is
//! cell `i`), split into two shares. Linear operations act on the shares
//! independently; the only nonlinear gadget is [`SharedPlane::nor_xor`].

use zeroize::Zeroize;

/// One masked bit plane: `value = share0 ^ share1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Zeroize)]
pub(crate) struct SharedPlane {
    shares: [u16; 2],
}

impl SharedPlane {
    pub(crate) const fn new(share0: u16, share1: u16) -> Self {
        Self {
            shares: [share0, share1],
        }
    }

    pub(crate) const fn share0(self) -> u16 {
        self.shares[0]
    }

    pub(crate) const fn share1(self) -> u16 {
        self.shares[1]
    }

    /// Complement, applied to share 0 only.
    #[inline(always)]
    pub(crate) const fn not(self) -> Self {
        Self::new(!self.shares[0], self.shares[1])
    }

    /// Adds per-share constants, e.g. a masked round tweakey.
    #[inline(always)]
    pub(crate) fn xor_shares(&mut self, share0: u16, share1: u16) {
        self.shares[0] ^= share0;
        self.shares[1] ^= share1;
    }

    /// Applies a GF(2)-linear lane map to both shares.
    #[inline(always)]
    pub(crate) fn map_linear(self, map: impl Fn(u16) -> u16) -> Self {
        Self::new(map(self.shares[0]), map(self.shares[1]))
    }

    /// Masked AND. Each output share mixes one input share of `self` with both
    /// shares of `rhs`, so no intermediate depends on an unmasked operand:
    /// `z_i = (p_i & q_0) ^ (p_i | !q_1)`.
    #[inline(always)]
    pub(crate) fn and(self, rhs: Self) -> Self {
        let q0 = rhs.shares[0];
        let nq1 = !rhs.shares[1];
        Self::new(
            (self.shares[0] & q0) ^ (self.shares[0] | nq1),
            (self.shares[1] & q0) ^ (self.shares[1] | nq1),
        )
    }

    /// `self ^= !(a | b)`, the only nonlinear step of the S-box.
    #[inline(always)]
    pub(crate) fn nor_xor(&mut self, a: Self, b: Self) {
        let product = a.not().and(b.not());
        self.shares[0] ^= product.shares[0];
        self.shares[1] ^= product.shares[1];
    }

    /// Recombined value. Tests only.
    #[cfg(test)]
    pub(crate) fn value(self) -> u16 {
        self.shares[0] ^ self.shares[1]
    }
}
