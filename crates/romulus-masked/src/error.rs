//! Error type returned by the masked AEAD boundary.

use thiserror::Error;

use crate::config::Variant;

/// Failures surfaced by encryption, decryption and envelope handling.
#[derive(Debug, Error)]
pub enum RomulusError {
    /// A combined ciphertext was too short to even hold the tag.
    #[error("ciphertext of {len} bytes is shorter than the 16-byte tag")]
    InvalidCiphertextLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// The recomputed tag did not match; no plaintext is released.
    #[error("authentication failure")]
    AuthenticationFailure,
    /// The randomness source could not produce masks for this call.
    #[error("randomness source unavailable: {0}")]
    RandomnessUnavailable(String),
    /// A sealed envelope was opened under a different variant than it was sealed with.
    #[error("message sealed with Romulus-{found} cannot be opened as Romulus-{expected}")]
    VariantMismatch {
        /// Variant of the opening context.
        expected: Variant,
        /// Variant recorded in the envelope.
        found: Variant,
    },
    /// Envelope bytes could not be encoded or decoded.
    #[error("envelope encoding failed: {0}")]
    Envelope(#[from] bincode::Error),
}
