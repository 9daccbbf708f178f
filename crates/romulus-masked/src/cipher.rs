//! Masked SKINNY-128-384+ on bit-plane shares.

use skinny_core::ROUNDS;
use zeroize::Zeroize;

use crate::bitslice::{mix_columns, shift_rows, SlicedState};
use crate::gadgets::SharedPlane;
use crate::schedule::{RoundTweakeys, Tk1Schedule};
use crate::share::MaskedBlock;

/// Encrypts `state` in place under the TK1 schedule and masked TK2/TK3 tables.
pub(crate) fn encrypt(state: &mut MaskedBlock, tk1: &Tk1Schedule, tweakeys: &RoundTweakeys) {
    let mut sliced = SlicedState::pack(state);
    for round in 0..ROUNDS {
        sub_cells(&mut sliced.planes);
        add_round_tweakey(&mut sliced.planes, tk1, tweakeys, round);
        for plane in sliced.planes.iter_mut() {
            *plane = plane.map_linear(|p| mix_columns(shift_rows(p)));
        }
    }
    sliced.unpack_into(state);
    sliced.zeroize();
}

/// The SKINNY 8-bit S-box as four NOR-XOR layers with wire permutations.
#[inline(always)]
fn sub_cells(x: &mut [SharedPlane; 8]) {
    for _ in 0..3 {
        x[4].nor_xor(x[7], x[6]);
        x[0].nor_xor(x[3], x[2]);
        *x = [x[5], x[3], x[0], x[4], x[6], x[7], x[1], x[2]];
    }
    x[4].nor_xor(x[7], x[6]);
    x[0].nor_xor(x[3], x[2]);
    x.swap(1, 2);
}

/// Round constants are folded into the share 0 tables.
#[inline(always)]
fn add_round_tweakey(
    x: &mut [SharedPlane; 8],
    tk1: &Tk1Schedule,
    tweakeys: &RoundTweakeys,
    round: usize,
) {
    let public = tk1.round(round);
    let (share0, share1) = tweakeys.round(round);
    for (j, plane) in x.iter_mut().enumerate() {
        plane.xor_shares(public[j] ^ share0[j], share1[j]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitslice::{pack, unpack};
    use crate::testing::ZeroRng;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use skinny_core::{encrypt_block, sbox, Block, Tweakey};

    fn masked(value: &Block, rng: &mut ChaCha20Rng) -> MaskedBlock {
        MaskedBlock::mask(value, rng).unwrap()
    }

    #[test]
    fn sliced_sbox_matches_table_on_all_inputs() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for chunk in 0..16u8 {
            let block: Block = core::array::from_fn(|i| chunk * 16 + i as u8);
            let m = masked(&block, &mut rng);
            let mut sliced = SlicedState::pack(&m);
            sub_cells(&mut sliced.planes);
            let mut out = MaskedBlock::from_shares([0; 16], [0; 16]);
            sliced.unpack_into(&mut out);
            let expected: Block = core::array::from_fn(|i| sbox(block[i]));
            assert_eq!(out.unmask(), expected);
        }
    }

    #[test]
    fn unmasked_sbox_planes_match_table() {
        let block: Block = core::array::from_fn(|i| (i as u8).wrapping_mul(29));
        let planes = pack(&block);
        let mut x = [SharedPlane::default(); 8];
        for (plane, &p) in x.iter_mut().zip(planes.iter()) {
            *plane = SharedPlane::new(p, 0);
        }
        sub_cells(&mut x);
        let out: [u16; 8] = core::array::from_fn(|j| x[j].value());
        let expected: Block = core::array::from_fn(|i| sbox(block[i]));
        assert_eq!(unpack(&out), expected);
    }

    #[test]
    fn masked_encryption_matches_reference() {
        let mut rng = ChaCha20Rng::seed_from_u64(10);
        for _ in 0..64 {
            let (plaintext, tk1, tk2, key): (Block, Block, Block, Block) =
                (rng.gen(), rng.gen(), rng.gen(), rng.gen());
            let expected = encrypt_block(&plaintext, &Tweakey::new(tk1, tk2, key));

            let mut state = masked(&plaintext, &mut rng);
            let masked_key = masked(&key, &mut rng);
            encrypt(
                &mut state,
                &Tk1Schedule::new(&tk1),
                &RoundTweakeys::new(&tk2, &masked_key),
            );
            assert_eq!(state.unmask(), expected);
        }
    }

    #[test]
    fn output_is_independent_of_masks() {
        let plaintext = [0x42u8; 16];
        let tk1 = [0x01u8; 16];
        let tk2 = [0x02u8; 16];
        let key = [0x03u8; 16];
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        let mut trivial = MaskedBlock::mask(&plaintext, &mut ZeroRng).unwrap();
        let trivial_key = MaskedBlock::mask(&key, &mut ZeroRng).unwrap();
        encrypt(&mut trivial, &Tk1Schedule::new(&tk1), &RoundTweakeys::new(&tk2, &trivial_key));

        let mut state = masked(&plaintext, &mut rng);
        let masked_key = masked(&key, &mut rng);
        encrypt(&mut state, &Tk1Schedule::new(&tk1), &RoundTweakeys::new(&tk2, &masked_key));

        assert_eq!(trivial.unmask(), state.unmask());
        assert_ne!(trivial.share(1), state.share(1));
    }

    #[test]
    fn output_share_bytes_are_uniform() {
        // Fixed plaintext and key, fresh masks per run: share 1 of the output
        // must look uniform. 256 bins, 255 degrees of freedom.
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let plaintext = [0u8; 16];
        let key = [0u8; 16];
        let tk1 = Tk1Schedule::new(&[0u8; 16]);
        let mut counts = [0u32; 256];
        let runs = 1024;
        for _ in 0..runs {
            let mut state = masked(&plaintext, &mut rng);
            let masked_key = masked(&key, &mut rng);
            encrypt(&mut state, &tk1, &RoundTweakeys::new(&[0u8; 16], &masked_key));
            for &byte in state.share(1) {
                counts[byte as usize] += 1;
            }
        }
        let expected = f64::from(runs * 16) / 256.0;
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let d = f64::from(c) - expected;
                d * d / expected
            })
            .sum();
        assert!(chi2 < 400.0, "chi-square {chi2}");
    }
}
