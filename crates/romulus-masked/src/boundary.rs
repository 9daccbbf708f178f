//! Public encrypt/decrypt entry points.
//!
//! This is the only layer that touches unmasked secrets: it splits the key
//! (and, for Romulus-T, the nonce) into fresh shares, hands masked values to
//! the core, and receives the tag back as the single recombined output.

use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::aead::{open_in_place, seal_in_place, CallShares};
use crate::error::RomulusError;
use crate::trace::Tracer;
use crate::{Key, Nonce, Tag, Variant, VariantConfig, TAG_BYTES};

/// A masked Romulus context bound to a variant and a randomness source.
///
/// Every call draws new masks from `rng`, so equal inputs never produce the
/// same shares twice.
pub struct Romulus<R: RngCore + CryptoRng> {
    rng: R,
    config: VariantConfig,
}

impl<R: RngCore + CryptoRng> Romulus<R> {
    /// Creates a context for `variant`.
    pub fn new(variant: Variant, rng: R) -> Self {
        Self::with_config(rng, variant.config())
    }

    /// Creates a context from an explicit constant table.
    pub fn with_config(rng: R, config: VariantConfig) -> Self {
        Self { rng, config }
    }

    /// Constant table in use.
    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// Variant in use.
    pub fn variant(&self) -> Variant {
        self.config.variant()
    }

    /// Encrypts `plaintext`, returning the ciphertext and the detached tag.
    pub fn encrypt(
        &mut self,
        key: &Key,
        nonce: &Nonce,
        ad: &[u8],
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, Tag), RomulusError> {
        let mut buffer = plaintext.to_vec();
        let tag = self.encrypt_in_place_detached(key, nonce, ad, &mut buffer)?;
        Ok((buffer, tag))
    }

    /// Decrypts `ciphertext` under a detached `tag`.
    pub fn decrypt(
        &mut self,
        key: &Key,
        nonce: &Nonce,
        ad: &[u8],
        ciphertext: &[u8],
        tag: &Tag,
    ) -> Result<Vec<u8>, RomulusError> {
        let mut buffer = ciphertext.to_vec();
        self.decrypt_in_place_detached(key, nonce, ad, &mut buffer, tag)?;
        Ok(buffer)
    }

    /// Encrypts `plaintext` and appends the tag: `ciphertext || tag`.
    pub fn seal(
        &mut self,
        key: &Key,
        nonce: &Nonce,
        ad: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, RomulusError> {
        let mut sealed = Vec::with_capacity(plaintext.len() + TAG_BYTES);
        sealed.extend_from_slice(plaintext);
        let tag = self.encrypt_in_place_detached(key, nonce, ad, &mut sealed)?;
        sealed.extend_from_slice(&tag);
        Ok(sealed)
    }

    /// Opens `ciphertext || tag` produced by [`Romulus::seal`].
    pub fn open(
        &mut self,
        key: &Key,
        nonce: &Nonce,
        ad: &[u8],
        sealed: &[u8],
    ) -> Result<Vec<u8>, RomulusError> {
        if sealed.len() < TAG_BYTES {
            debug!(variant = %self.variant(), len = sealed.len(), "sealed input shorter than tag");
            return Err(RomulusError::InvalidCiphertextLength { len: sealed.len() });
        }
        let (ciphertext, tag_bytes) = sealed.split_at(sealed.len() - TAG_BYTES);
        let mut tag = [0u8; TAG_BYTES];
        tag.copy_from_slice(tag_bytes);
        self.decrypt(key, nonce, ad, ciphertext, &tag)
    }

    /// Encrypts `buffer` in place and returns the tag.
    pub fn encrypt_in_place_detached(
        &mut self,
        key: &Key,
        nonce: &Nonce,
        ad: &[u8],
        buffer: &mut [u8],
    ) -> Result<Tag, RomulusError> {
        self.encrypt_traced(key, nonce, ad, buffer, &mut ())
    }

    /// Decrypts `buffer` in place. On authentication failure the buffer is
    /// zeroed.
    pub fn decrypt_in_place_detached(
        &mut self,
        key: &Key,
        nonce: &Nonce,
        ad: &[u8],
        buffer: &mut [u8],
        tag: &Tag,
    ) -> Result<(), RomulusError> {
        self.decrypt_traced(key, nonce, ad, buffer, tag, &mut ())
    }

    pub(crate) fn encrypt_traced<T: Tracer>(
        &mut self,
        key: &Key,
        nonce: &Nonce,
        ad: &[u8],
        buffer: &mut [u8],
        trace: &mut T,
    ) -> Result<Tag, RomulusError> {
        debug!(
            variant = %self.variant(),
            ad_len = ad.len(),
            msg_len = buffer.len(),
            "encrypt"
        );
        let shares = CallShares::draw(&self.config, key, nonce, false, &mut self.rng)?;
        seal_in_place(&self.config, shares, nonce, ad, buffer, trace)
    }

    pub(crate) fn decrypt_traced<T: Tracer>(
        &mut self,
        key: &Key,
        nonce: &Nonce,
        ad: &[u8],
        buffer: &mut [u8],
        tag: &Tag,
        trace: &mut T,
    ) -> Result<(), RomulusError> {
        debug!(
            variant = %self.variant(),
            ad_len = ad.len(),
            ct_len = buffer.len(),
            "decrypt"
        );
        let shares = CallShares::draw(&self.config, key, nonce, true, &mut self.rng)?;
        let result = open_in_place(&self.config, shares, nonce, ad, buffer, tag, trace);
        if result.is_err() {
            debug!(variant = %self.variant(), "decryption rejected");
        }
        result
    }
}
