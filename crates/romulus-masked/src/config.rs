//! Variant selection and the per-variant constant tables.
//!
//! All three variants run through one masked core; what differs is captured
//! by a [`VariantConfig`]: domain-separation bytes, whether the nonce is
//! masked, single or double pass decryption, and whether the tag covers the
//! plaintext or the ciphertext.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three Romulus AEAD variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Nonce-based, one pass each way.
    N,
    /// Misuse-resistant, tag over the plaintext, two-pass decryption.
    M,
    /// Leakage-resilient, tag over the ciphertext with a re-keyed keystream.
    T,
}

impl Variant {
    /// All variants, in declaration order.
    pub const ALL: [Variant; 3] = [Variant::N, Variant::M, Variant::T];

    /// Constant table for this variant.
    pub const fn config(self) -> VariantConfig {
        match self {
            Variant::N => VariantConfig::ROMULUS_N,
            Variant::M => VariantConfig::ROMULUS_M,
            Variant::T => VariantConfig::ROMULUS_T,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::N => "N",
            Variant::M => "M",
            Variant::T => "T",
        };
        f.write_str(name)
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().trim_start_matches("romulus-") {
            "n" => Ok(Variant::N),
            "m" => Ok(Variant::M),
            "t" => Ok(Variant::T),
            other => Err(format!("unknown Romulus variant '{other}' (expected n, m or t)")),
        }
    }
}

/// How many passes decryption makes over the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecryptPasses {
    /// Decrypt and authenticate in the same pass.
    Single,
    /// Decrypt from the tag first, then recompute the tag over the plaintext.
    Double,
}

/// Which message the tag authenticates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagInput {
    /// The tag is computed over the plaintext (N, M).
    Plaintext,
    /// The tag is computed over the ciphertext (T).
    Ciphertext,
}

/// Domain-separation bytes placed in TK1 byte 7.
///
/// Fields a variant does not use are zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Domains {
    /// Cipher call absorbing an associated-data block in the tweak slot.
    pub ad_pair: u8,
    /// Cipher call absorbing a message block in the tweak slot.
    pub message_pair: u8,
    /// Base of the final absorption domain.
    pub final_base: u8,
    /// Added to the final domain when the AD block count is even.
    pub ad_even: u8,
    /// Added to the final domain when the last AD block is padded.
    pub ad_partial: u8,
    /// Added to the final domain when the message block count is even.
    pub message_even: u8,
    /// Added to the final domain when the last message block is padded.
    pub message_partial: u8,
    /// Message pass cipher call for a block that is not the last one.
    pub message_block: u8,
    /// Message pass cipher call after a final full block.
    pub message_last_full: u8,
    /// Message pass cipher call after a final padded block.
    pub message_last_partial: u8,
    /// Session key derivation.
    pub kdf: u8,
    /// Keystream block generation.
    pub keystream: u8,
    /// Session key refresh between keystream blocks.
    pub rekey: u8,
    /// Tag generation from the hash digest.
    pub tag: u8,
}

impl Domains {
    const EMPTY: Domains = Domains {
        ad_pair: 0,
        message_pair: 0,
        final_base: 0,
        ad_even: 0,
        ad_partial: 0,
        message_even: 0,
        message_partial: 0,
        message_block: 0,
        message_last_full: 0,
        message_last_partial: 0,
        kdf: 0,
        keystream: 0,
        rekey: 0,
        tag: 0,
    };
}

/// Constant configuration driving the shared AEAD core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantConfig {
    variant: Variant,
    domains: Domains,
    masked_nonce: bool,
    absorb_message: bool,
    decrypt_passes: DecryptPasses,
    tag_input: TagInput,
    linear_finalization: bool,
}

impl VariantConfig {
    /// Romulus-N.
    pub const ROMULUS_N: VariantConfig = VariantConfig {
        variant: Variant::N,
        domains: Domains {
            ad_pair: 0x08,
            final_base: 0x18,
            ad_partial: 0x02,
            message_block: 0x04,
            message_last_full: 0x14,
            message_last_partial: 0x15,
            ..Domains::EMPTY
        },
        masked_nonce: false,
        absorb_message: false,
        decrypt_passes: DecryptPasses::Single,
        tag_input: TagInput::Plaintext,
        linear_finalization: true,
    };

    /// Romulus-M.
    pub const ROMULUS_M: VariantConfig = VariantConfig {
        variant: Variant::M,
        domains: Domains {
            ad_pair: 0x28,
            message_pair: 0x2c,
            final_base: 0x30,
            ad_even: 0x08,
            ad_partial: 0x02,
            message_even: 0x04,
            message_partial: 0x01,
            message_block: 0x24,
            message_last_full: 0x24,
            message_last_partial: 0x24,
            ..Domains::EMPTY
        },
        masked_nonce: false,
        absorb_message: true,
        decrypt_passes: DecryptPasses::Double,
        tag_input: TagInput::Plaintext,
        linear_finalization: true,
    };

    /// Romulus-T.
    pub const ROMULUS_T: VariantConfig = VariantConfig {
        variant: Variant::T,
        domains: Domains {
            kdf: 0x42,
            keystream: 0x40,
            rekey: 0x41,
            tag: 0x44,
            ..Domains::EMPTY
        },
        masked_nonce: true,
        absorb_message: false,
        decrypt_passes: DecryptPasses::Single,
        tag_input: TagInput::Ciphertext,
        linear_finalization: false,
    };

    /// Variant this table belongs to.
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Domain-separation bytes.
    pub const fn domains(&self) -> &Domains {
        &self.domains
    }

    /// True when the nonce enters the cipher as a masked value.
    pub const fn masked_nonce(&self) -> bool {
        self.masked_nonce
    }

    /// True when the message is absorbed alongside the associated data.
    pub const fn absorb_message(&self) -> bool {
        self.absorb_message
    }

    /// Decryption pass structure.
    pub const fn decrypt_passes(&self) -> DecryptPasses {
        self.decrypt_passes
    }

    /// Message covered by the tag.
    pub const fn tag_input(&self) -> TagInput {
        self.tag_input
    }

    /// True when the tag is `G` applied to the final state.
    pub const fn linear_finalization(&self) -> bool {
        self.linear_finalization
    }

    /// Fresh logical-zero states a call needs, one per pass that starts from one.
    pub const fn state_masks(&self, decrypting: bool) -> usize {
        match (self.tag_input, self.decrypt_passes, decrypting) {
            (TagInput::Ciphertext, _, _) => 0,
            (TagInput::Plaintext, DecryptPasses::Double, true) => 2,
            (TagInput::Plaintext, _, _) => 1,
        }
    }
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self::ROMULUS_N
    }
}

impl From<Variant> for VariantConfig {
    fn from(variant: Variant) -> Self {
        variant.config()
    }
}
