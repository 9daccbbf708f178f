//! Reference SKINNY-128-384+ implementation used by the masked Romulus crates.
//!
//! This crate follows the SKINNY paper cell by cell and provides:
//! - The 8-bit S-box and the round transformations.
//! - The TK1/TK2/TK3 tweakey schedule (cell permutation, LFSRs, round constants).
//! - Single-block encryption for the 40-round "+" variant or any round count.
//!
//! The implementation aims for clarity and testability rather than constant-time
//! guarantees; it must only ever see public inputs or serve as a test oracle.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
pub mod round;
mod sbox;
mod tweakey;

pub use crate::block::{xor_in_place, Block, BLOCK_BYTES};
pub use crate::cipher::{encrypt_block, encrypt_block_rounds, ROUNDS};
pub use crate::sbox::sbox;
pub use crate::tweakey::{
    expand_tweakey, lfsr2, lfsr3, permute_cells, RoundConstants, RoundTweakeys, Tweakey,
    TWEAKEY_PERMUTATION,
};
