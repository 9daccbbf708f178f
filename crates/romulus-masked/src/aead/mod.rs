//! The shared masked AEAD core.
//!
//! Every variant is a composition of the same passes (absorption, message
//! feedback, keystream, hash) selected by its [`VariantConfig`]. The core only
//! ever sees masked secrets and public data; it never draws randomness and
//! never recombines shares except to release the tag.

mod absorb;
mod feedback;
mod finalize;
mod hash;
mod message;
mod romulus_t;

use rand::{CryptoRng, RngCore};
use skinny_core::Block;
use zeroize::Zeroize;

use crate::cipher;
use crate::config::{DecryptPasses, TagInput};
use crate::error::RomulusError;
use crate::schedule::{Counter, RoundTweakeys, Tk1Schedule};
use crate::share::MaskedBlock;
use crate::trace::{Step, Tracer};
use crate::{Key, Nonce, Tag, VariantConfig};

use feedback::Direction;

/// Masked inputs for one call, drawn before any processing starts.
pub(crate) struct CallShares {
    pub(crate) key: MaskedBlock,
    /// Present only when the variant masks the nonce.
    pub(crate) nonce: Option<MaskedBlock>,
    /// One fresh logical-zero state per pass that starts from one, in pass order.
    pub(crate) states: Vec<MaskedBlock>,
}

impl CallShares {
    /// Draws every mask the call needs: key, nonce (when masked) and states.
    pub(crate) fn draw<R: RngCore + CryptoRng>(
        config: &VariantConfig,
        key: &Key,
        nonce: &Nonce,
        decrypting: bool,
        rng: &mut R,
    ) -> Result<Self, RomulusError> {
        let key = MaskedBlock::mask(key, rng)?;
        let nonce = if config.masked_nonce() {
            Some(MaskedBlock::mask(nonce, rng)?)
        } else {
            None
        };
        let states = (0..config.state_masks(decrypting))
            .map(|_| MaskedBlock::zero(&mut *rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { key, nonce, states })
    }

    fn next_state(&mut self) -> Result<MaskedBlock, RomulusError> {
        if self.states.is_empty() {
            return Err(missing_mask("state"));
        }
        Ok(self.states.remove(0))
    }

    fn masked_nonce(&mut self) -> Result<MaskedBlock, RomulusError> {
        self.nonce.take().ok_or_else(|| missing_mask("nonce"))
    }
}

fn missing_mask(what: &str) -> RomulusError {
    RomulusError::RandomnessUnavailable(format!("no {what} mask was drawn for this pass"))
}

/// One masked cipher call with a TK1 of `(counter, domain)`.
pub(crate) fn tweak_cipher<T: Tracer>(
    state: &mut MaskedBlock,
    counter: Counter,
    domain: u8,
    tweakeys: &RoundTweakeys,
    trace: &mut T,
) {
    trace.record(Step::Cipher {
        domain,
        counter: counter.value(),
    });
    let tk1 = Tk1Schedule::new(&counter.tk1(domain));
    cipher::encrypt(state, &tk1, tweakeys);
}

/// Encrypts `buffer` in place and returns the tag.
pub(crate) fn seal_in_place<T: Tracer>(
    config: &VariantConfig,
    mut shares: CallShares,
    nonce: &Block,
    ad: &[u8],
    buffer: &mut [u8],
    trace: &mut T,
) -> Result<Tag, RomulusError> {
    let tag = match (config.tag_input(), config.decrypt_passes()) {
        (TagInput::Ciphertext, _) => {
            let masked_nonce = shares.masked_nonce()?;
            let session = romulus_t::derive_session_key(config, &shares.key, &masked_nonce, trace);
            romulus_t::keystream_pass(config, session, &masked_nonce, buffer, trace);
            romulus_t::tag_state(config, &shares.key, nonce, ad, buffer, trace)
        }
        (TagInput::Plaintext, DecryptPasses::Single) => {
            let mut state = shares.next_state()?;
            let tweakeys = absorb::absorb(config, &mut state, &shares.key, nonce, ad, None, trace);
            message::stream_pass(config, &mut state, &tweakeys, buffer, Direction::Encrypt, trace);
            finalize::tag_shares(config, state)
        }
        (TagInput::Plaintext, DecryptPasses::Double) => {
            let mut state = shares.next_state()?;
            let tweakeys =
                absorb::absorb(config, &mut state, &shares.key, nonce, ad, Some(&*buffer), trace);
            let tag = finalize::tag_shares(config, state);
            let mut stream = tag.clone();
            message::synthetic_pass(config, &mut stream, &tweakeys, buffer, Direction::Encrypt, trace);
            tag
        }
    };
    Ok(finalize::release_tag(&tag))
}

/// Decrypts `buffer` in place after checking `tag`. On failure the buffer is
/// wiped and no plaintext is left behind.
pub(crate) fn open_in_place<T: Tracer>(
    config: &VariantConfig,
    mut shares: CallShares,
    nonce: &Block,
    ad: &[u8],
    buffer: &mut [u8],
    tag: &Tag,
    trace: &mut T,
) -> Result<(), RomulusError> {
    let verified = match (config.tag_input(), config.decrypt_passes()) {
        (TagInput::Ciphertext, _) => {
            let computed = romulus_t::tag_state(config, &shares.key, nonce, ad, buffer, trace);
            let verified = finalize::verify_tag(&computed, tag, trace);
            if verified {
                let masked_nonce = shares.masked_nonce()?;
                let session =
                    romulus_t::derive_session_key(config, &shares.key, &masked_nonce, trace);
                romulus_t::keystream_pass(config, session, &masked_nonce, buffer, trace);
            }
            verified
        }
        (TagInput::Plaintext, DecryptPasses::Single) => {
            let mut state = shares.next_state()?;
            let tweakeys = absorb::absorb(config, &mut state, &shares.key, nonce, ad, None, trace);
            message::stream_pass(config, &mut state, &tweakeys, buffer, Direction::Decrypt, trace);
            let computed = finalize::tag_shares(config, state);
            finalize::verify_tag(&computed, tag, trace)
        }
        (TagInput::Plaintext, DecryptPasses::Double) => {
            let mut stream = shares.next_state()?;
            let mut state = shares.next_state()?;
            stream.xor_public(tag);
            let tweakeys = RoundTweakeys::new(nonce, &shares.key);
            message::synthetic_pass(config, &mut stream, &tweakeys, buffer, Direction::Decrypt, trace);

            absorb::absorb(config, &mut state, &shares.key, nonce, ad, Some(&*buffer), trace);
            let computed = finalize::tag_shares(config, state);
            finalize::verify_tag(&computed, tag, trace)
        }
    };

    if verified {
        Ok(())
    } else {
        buffer.zeroize();
        Err(RomulusError::AuthenticationFailure)
    }
}
