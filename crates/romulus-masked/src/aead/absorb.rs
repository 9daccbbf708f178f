//! Associated-data absorption (plus the message, for Romulus-M).
//!
//! The input is consumed as padded 16-byte blocks that alternate between two
//! slots: even blocks are XORed into the state, odd blocks become TK2 of a
//! cipher call. The parity carries over from the associated data into the
//! message. A final call under the nonce closes the pass.

use skinny_core::{Block, BLOCK_BYTES};

use crate::aead::tweak_cipher;
use crate::config::Domains;
use crate::schedule::{Counter, RoundTweakeys};
use crate::share::MaskedBlock;
use crate::trace::{Step, Tracer};
use crate::VariantConfig;

/// Zero-pads `chunk`, storing its length in the last byte when short.
fn pad(chunk: &[u8]) -> Block {
    let mut block = [0u8; BLOCK_BYTES];
    block[..chunk.len()].copy_from_slice(chunk);
    if chunk.len() < BLOCK_BYTES {
        block[BLOCK_BYTES - 1] = chunk.len() as u8;
    }
    block
}

/// Splits `data` into padded blocks; empty input is one all-zero padded block.
pub(crate) fn padded_blocks(data: &[u8]) -> impl Iterator<Item = Block> + '_ {
    let empty = data.is_empty().then(|| pad(&[]));
    data.chunks(BLOCK_BYTES).map(pad).chain(empty)
}

/// Number of padded blocks in a section and whether the last one is short.
pub(crate) fn section_shape(len: usize) -> (usize, bool) {
    let blocks = len.div_ceil(BLOCK_BYTES).max(1);
    (blocks, len % BLOCK_BYTES != 0 || len == 0)
}

/// Domain byte of the closing cipher call.
pub(crate) fn final_domain(domains: &Domains, ad_len: usize, message_len: Option<usize>) -> u8 {
    let mut domain = domains.final_base;
    let (ad_blocks, ad_partial) = section_shape(ad_len);
    if ad_blocks % 2 == 0 {
        domain ^= domains.ad_even;
    }
    if ad_partial {
        domain ^= domains.ad_partial;
    }
    if let Some(len) = message_len {
        let (blocks, partial) = section_shape(len);
        if blocks % 2 == 0 {
            domain ^= domains.message_even;
        }
        if partial {
            domain ^= domains.message_partial;
        }
    }
    domain
}

/// Runs the absorption pass over `state`.
///
/// Returns the nonce/key tables of the closing call; Romulus-M keeps using
/// them for its message pass.
pub(crate) fn absorb<T: Tracer>(
    config: &VariantConfig,
    state: &mut MaskedBlock,
    key: &MaskedBlock,
    nonce: &Block,
    ad: &[u8],
    message: Option<&[u8]>,
    trace: &mut T,
) -> RoundTweakeys {
    let domains = config.domains();
    let sections = [
        Some((ad, domains.ad_pair)),
        message.map(|m| (m, domains.message_pair)),
    ];

    let mut counter = Counter::start();
    let mut state_slot = true;
    for (data, pair_domain) in sections.into_iter().flatten() {
        for block in padded_blocks(data) {
            if state_slot {
                counter.step();
                state.xor_public(&block);
                trace.record(Step::Absorb);
            } else {
                let tweakeys = RoundTweakeys::new(&block, key);
                tweak_cipher(state, counter, pair_domain, &tweakeys, trace);
                counter.step();
            }
            state_slot = !state_slot;
        }
    }

    let domain = final_domain(domains, ad.len(), message.map(<[u8]>::len));
    let tweakeys = RoundTweakeys::new(nonce, key);
    tweak_cipher(state, counter, domain, &tweakeys, trace);
    tweakeys
}
