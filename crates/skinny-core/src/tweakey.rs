//! Tweakey schedule for SKINNY-128-384.

use crate::block::Block;

/// Cell permutation `P_T` applied to every tweakey word each round.
pub const TWEAKEY_PERMUTATION: [usize; 16] = [9, 15, 8, 13, 10, 14, 12, 11, 0, 1, 2, 3, 4, 5, 6, 7];

/// The three 128-bit tweakey words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tweakey {
    /// First word (no LFSR).
    pub tk1: Block,
    /// Second word (LFSR2 on the top two rows).
    pub tk2: Block,
    /// Third word (LFSR3 on the top two rows).
    pub tk3: Block,
}

impl Tweakey {
    /// Assembles a tweakey from its three words.
    pub const fn new(tk1: Block, tk2: Block, tk3: Block) -> Self {
        Self { tk1, tk2, tk3 }
    }
}

/// TK2 cell LFSR: `(x7..x0) -> (x6..x0, x7 ^ x5)`.
#[inline]
pub const fn lfsr2(x: u8) -> u8 {
    (x << 1) | (((x >> 7) ^ (x >> 5)) & 0x01)
}

/// TK3 cell LFSR: `(x7..x0) -> (x0 ^ x6, x7..x1)`.
#[inline]
pub const fn lfsr3(x: u8) -> u8 {
    (x >> 1) | (((x ^ (x >> 6)) & 0x01) << 7)
}

/// Applies `P_T` to a tweakey word in place.
#[inline]
pub fn permute_cells(tk: &mut Block) {
    let src = *tk;
    for (dst, &idx) in tk.iter_mut().zip(TWEAKEY_PERMUTATION.iter()) {
        *dst = src[idx];
    }
}

/// 6-bit round constant LFSR, yielding the constant for each round in order.
#[derive(Clone, Debug, Default)]
pub struct RoundConstants {
    rc: u8,
}

impl RoundConstants {
    /// Starts the sequence at the all-zero LFSR state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for RoundConstants {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.rc = ((self.rc << 1) & 0x3f) | (((self.rc >> 5) ^ (self.rc >> 4) ^ 1) & 0x01);
        Some(self.rc)
    }
}

/// Expanded round tweakeys: the top two rows of `TK1 ^ TK2 ^ TK3` per round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundTweakeys(pub Vec<[u8; 8]>);

impl RoundTweakeys {
    /// Returns the round tweakey at the requested index.
    #[inline]
    pub fn get(&self, round: usize) -> &[u8; 8] {
        &self.0[round]
    }
}

/// Expands a tweakey into `rounds` round tweakeys.
pub fn expand_tweakey(tweakey: &Tweakey, rounds: usize) -> RoundTweakeys {
    let Tweakey {
        mut tk1,
        mut tk2,
        mut tk3,
    } = *tweakey;
    let mut out = Vec::with_capacity(rounds);
    for _ in 0..rounds {
        let mut rtk = [0u8; 8];
        for (i, cell) in rtk.iter_mut().enumerate() {
            *cell = tk1[i] ^ tk2[i] ^ tk3[i];
        }
        out.push(rtk);

        permute_cells(&mut tk1);
        permute_cells(&mut tk2);
        permute_cells(&mut tk3);
        for i in 0..8 {
            tk2[i] = lfsr2(tk2[i]);
            tk3[i] = lfsr3(tk3[i]);
        }
    }
    RoundTweakeys(out)
}
