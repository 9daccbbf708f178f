//! Precomputed round-tweakey tables in bit-plane form.
//!
//! TK1 (counter and domain, public) only goes through the cell permutation,
//! which has period 16, so sixteen rounds cover all forty. TK2 is public and
//! TK3 is the masked key; both LFSRs are linear, so the TK3 schedule runs on
//! each share independently and TK2 folds into share 0 together with the
//! round constants.

use skinny_core::{lfsr2, lfsr3, permute_cells, Block, RoundConstants, ROUNDS};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::bitslice::{pack, Planes};
use crate::share::MaskedBlock;

/// Period of the TK1 cell permutation.
pub(crate) const TK1_PERIOD: usize = 16;

const COUNTER_MASK: u64 = (1 << 56) - 1;
const COUNTER_FEEDBACK: u64 = 0x95;

/// 56-bit LFSR block counter carried in the first seven TK1 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Counter(u64);

impl Counter {
    /// Counter value at the start of every pass.
    pub(crate) const fn start() -> Self {
        Self(1)
    }

    /// All-zero counter used by the key derivation and tag tweaks.
    pub(crate) const fn zero() -> Self {
        Self(0)
    }

    pub(crate) const fn value(self) -> u64 {
        self.0
    }

    /// One LFSR step: shift left, fold the dropped bit back in as `0x95`.
    pub(crate) fn step(&mut self) {
        let feedback = ((self.0 >> 55) & 1).wrapping_neg() & COUNTER_FEEDBACK;
        self.0 = ((self.0 << 1) & COUNTER_MASK) ^ feedback;
    }

    /// TK1 for this counter: 7 little-endian counter bytes, the domain byte, zeros.
    pub(crate) fn tk1(self, domain: u8) -> Block {
        let mut tk1 = [0u8; 16];
        tk1[..7].copy_from_slice(&self.0.to_le_bytes()[..7]);
        tk1[7] = domain;
        tk1
    }
}

/// Bit-plane round tweakeys contributed by TK1, indexed by `round % 16`.
pub(crate) struct Tk1Schedule {
    rounds: [Planes; TK1_PERIOD],
}

impl Tk1Schedule {
    pub(crate) fn new(tk1: &Block) -> Self {
        let mut tk = *tk1;
        let mut rounds = [[0u16; 8]; TK1_PERIOD];
        for slot in rounds.iter_mut() {
            *slot = pack(&top_rows(&tk));
            permute_cells(&mut tk);
        }
        Self { rounds }
    }

    #[inline]
    pub(crate) fn round(&self, round: usize) -> &Planes {
        &self.rounds[round % TK1_PERIOD]
    }
}

/// Masked TK2/TK3 round tweakeys for all forty rounds.
///
/// `tk23[r]` holds TK2, share 0 of TK3 and the round constants;
/// `tk3_mask[r]` holds share 1 of TK3.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct RoundTweakeys {
    tk23: [Planes; ROUNDS],
    tk3_mask: [Planes; ROUNDS],
}

impl RoundTweakeys {
    pub(crate) fn new(tk2: &Block, tk3: &MaskedBlock) -> Self {
        let mut tk2 = *tk2;
        let mut tk3_0 = *tk3.share(0);
        let mut tk3_1 = *tk3.share(1);
        let mut tables = Self {
            tk23: [[0u16; 8]; ROUNDS],
            tk3_mask: [[0u16; 8]; ROUNDS],
        };

        for (round, rc) in (0..ROUNDS).zip(RoundConstants::new()) {
            let mut rtk = [0u8; 16];
            for i in 0..8 {
                rtk[i] = tk2[i] ^ tk3_0[i];
            }
            rtk[0] ^= rc & 0x0f;
            rtk[4] ^= (rc >> 4) & 0x03;
            rtk[8] ^= 0x02;
            tables.tk23[round] = pack(&rtk);
            tables.tk3_mask[round] = pack(&top_rows(&tk3_1));
            rtk.zeroize();

            permute_cells(&mut tk2);
            permute_cells(&mut tk3_0);
            permute_cells(&mut tk3_1);
            for i in 0..8 {
                tk2[i] = lfsr2(tk2[i]);
                tk3_0[i] = lfsr3(tk3_0[i]);
                tk3_1[i] = lfsr3(tk3_1[i]);
            }
        }

        tk3_0.zeroize();
        tk3_1.zeroize();
        tables
    }

    /// Share 0 and share 1 contributions for `round`.
    #[inline]
    pub(crate) fn round(&self, round: usize) -> (&Planes, &Planes) {
        (&self.tk23[round], &self.tk3_mask[round])
    }
}

/// Keeps rows 0 and 1; rows 2 and 3 never enter the state.
fn top_rows(tk: &Block) -> Block {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&tk[..8]);
    out
}
