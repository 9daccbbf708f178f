//! Self-describing sealed message and its `bincode` serialization.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::boundary::Romulus;
use crate::error::RomulusError;
use crate::{Key, Nonce, Tag, Variant};

/// Current envelope format version.
pub const ENVELOPE_VERSION: u32 = 1;

/// Everything a receiver needs besides the key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedMessage {
    /// Format version.
    pub version: u32,
    /// Variant that produced the ciphertext.
    pub variant: Variant,
    /// Public nonce.
    pub nonce: Nonce,
    /// Associated data, authenticated but not encrypted.
    pub associated_data: Vec<u8>,
    /// Ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Authentication tag.
    pub tag: Tag,
}

impl SealedMessage {
    /// Encrypts `plaintext` with `romulus` and packages the result.
    pub fn seal<R: RngCore + CryptoRng>(
        romulus: &mut Romulus<R>,
        key: &Key,
        nonce: &Nonce,
        associated_data: &[u8],
        plaintext: &[u8],
    ) -> Result<Self, RomulusError> {
        let (ciphertext, tag) = romulus.encrypt(key, nonce, associated_data, plaintext)?;
        Ok(Self {
            version: ENVELOPE_VERSION,
            variant: romulus.variant(),
            nonce: *nonce,
            associated_data: associated_data.to_vec(),
            ciphertext,
            tag,
        })
    }

    /// Authenticates and decrypts. The context must use the recorded variant.
    pub fn open<R: RngCore + CryptoRng>(
        &self,
        romulus: &mut Romulus<R>,
        key: &Key,
    ) -> Result<Vec<u8>, RomulusError> {
        if romulus.variant() != self.variant {
            return Err(RomulusError::VariantMismatch {
                expected: romulus.variant(),
                found: self.variant,
            });
        }
        romulus.decrypt(key, &self.nonce, &self.associated_data, &self.ciphertext, &self.tag)
    }

    /// Serializes the envelope with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RomulusError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserializes an envelope with `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RomulusError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
