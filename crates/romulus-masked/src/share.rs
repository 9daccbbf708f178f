//! Two-share Boolean masking of 128-bit values.
//!
//! A [`MaskedBlock`] holds `(s0, s1)` with `value = s0 ^ s1`. Only linear maps
//! may be applied share-wise; recombination happens solely at the boundary
//! when a tag or keystream is released.

use std::fmt;

use rand::{CryptoRng, RngCore};
use skinny_core::{xor_in_place, Block, BLOCK_BYTES};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::RomulusError;

/// A secret block split into two Boolean shares.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub(crate) struct MaskedBlock {
    shares: [Block; 2],
}

impl MaskedBlock {
    /// Builds a masked block from explicit shares.
    pub(crate) fn from_shares(share0: Block, share1: Block) -> Self {
        Self {
            shares: [share0, share1],
        }
    }

    /// Splits `value` using 16 fresh bytes from `rng` as the second share.
    pub(crate) fn mask<R: RngCore + CryptoRng>(value: &Block, rng: &mut R) -> Result<Self, RomulusError> {
        let mut masked = Self::zero(rng)?;
        masked.xor_public(value);
        Ok(masked)
    }

    /// A fresh encoding of the all-zero block: `(r, r)` for random `r`.
    pub(crate) fn zero<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, RomulusError> {
        let mut mask = [0u8; BLOCK_BYTES];
        rng.try_fill_bytes(&mut mask)
            .map_err(|err| RomulusError::RandomnessUnavailable(err.to_string()))?;
        let masked = Self::from_shares(mask, mask);
        mask.zeroize();
        Ok(masked)
    }

    /// Returns one share. Either share on its own is independent of the value.
    pub(crate) fn share(&self, index: usize) -> &Block {
        &self.shares[index]
    }

    pub(crate) fn share_mut(&mut self, index: usize) -> &mut Block {
        &mut self.shares[index]
    }

    /// XORs public data into the value by touching share 0 only.
    pub(crate) fn xor_public(&mut self, data: &Block) {
        xor_in_place(&mut self.shares[0], data);
    }

    /// Applies a GF(2)-linear map to each share independently.
    pub(crate) fn map_linear(&mut self, map: impl Fn(&Block) -> Block) {
        for share in self.shares.iter_mut() {
            *share = map(share);
        }
    }

    /// XORs the masked value into `data` without forming the value itself.
    pub(crate) fn apply_keystream(&self, data: &mut [u8]) {
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = (*byte ^ self.shares[0][i]) ^ self.shares[1][i];
        }
    }

    /// Recombines the shares. Only tag release may call this.
    pub(crate) fn unmask(&self) -> Block {
        let mut value = self.shares[0];
        xor_in_place(&mut value, &self.shares[1]);
        value
    }
}

impl fmt::Debug for MaskedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MaskedBlock { .. }")
    }
}
