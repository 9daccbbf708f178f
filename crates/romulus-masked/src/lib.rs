//! First-order masked Romulus authenticated encryption.
//!
//! This crate implements Romulus-N, Romulus-M and Romulus-T on a two-share
//! Boolean-masked SKINNY-128-384+. It provides:
//! - [`Romulus`], the boundary that masks the key (and the Romulus-T nonce)
//!   with fresh randomness and exposes encrypt/decrypt/seal/open.
//! - [`VariantConfig`], the constant table that selects a variant's domain
//!   bytes and pass structure.
//! - [`SealedMessage`], a `bincode` envelope carrying everything but the key.
//!
//! Secret-dependent values never drive branches, table indices or memory
//! addresses, and the two shares of a secret are only recombined when the
//! tag or the keystream leaves the core. The reference cipher in
//! `skinny-core` is used only for public data and as a test oracle.
//!
//! Shares stay inside the crate; callers only ever see byte arrays:
//!
//! ```compile_fail
//! use romulus_masked::MaskedBlock;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod aead;
mod bitslice;
mod boundary;
mod cipher;
mod config;
mod envelope;
mod error;
mod gadgets;
mod schedule;
mod share;
mod trace;

#[cfg(test)]
mod testing;

pub use crate::boundary::Romulus;
pub use crate::config::{DecryptPasses, Domains, TagInput, Variant, VariantConfig};
pub use crate::envelope::{SealedMessage, ENVELOPE_VERSION};
pub use crate::error::RomulusError;

/// Key length in bytes.
pub const KEY_BYTES: usize = 16;
/// Nonce length in bytes.
pub const NONCE_BYTES: usize = 16;
/// Tag length in bytes.
pub const TAG_BYTES: usize = 16;

/// A 128-bit key.
pub type Key = [u8; KEY_BYTES];
/// A 128-bit nonce.
pub type Nonce = [u8; NONCE_BYTES];
/// A 128-bit authentication tag.
pub type Tag = [u8; TAG_BYTES];
