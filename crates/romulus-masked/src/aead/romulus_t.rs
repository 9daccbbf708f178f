//! Romulus-T: masked key derivation, re-keyed keystream, hash-then-encrypt tag.
//!
//! The key, the derived session keys and the nonce fed to the keystream stay
//! masked. The hash only sees public data; its digest is encrypted under the
//! masked long-term key to form the tag.

use skinny_core::{Block, BLOCK_BYTES};

use crate::aead::hash::hash;
use crate::aead::tweak_cipher;
use crate::schedule::{Counter, RoundTweakeys};
use crate::share::MaskedBlock;
use crate::trace::{Step, Tracer};
use crate::VariantConfig;

const ZERO_TWEAK: Block = [0u8; BLOCK_BYTES];

/// `Z = E_K^{(0, kdf), 0}(N)` on masked key and nonce.
pub(crate) fn derive_session_key<T: Tracer>(
    config: &VariantConfig,
    key: &MaskedBlock,
    nonce: &MaskedBlock,
    trace: &mut T,
) -> MaskedBlock {
    let tweakeys = RoundTweakeys::new(&ZERO_TWEAK, key);
    let mut session = nonce.clone();
    tweak_cipher(&mut session, Counter::zero(), config.domains().kdf, &tweakeys, trace);
    session
}

/// XORs the keystream into `data`. Block `i` uses `E_Z^{(c_i, keystream)}(N)`
/// and, unless it is the last block, refreshes `Z = E_Z^{(c_i, rekey)}(N)`.
pub(crate) fn keystream_pass<T: Tracer>(
    config: &VariantConfig,
    mut session: MaskedBlock,
    nonce: &MaskedBlock,
    data: &mut [u8],
    trace: &mut T,
) {
    let domains = config.domains();
    let blocks = data.len().div_ceil(BLOCK_BYTES);
    let mut counter = Counter::start();
    for (index, chunk) in data.chunks_mut(BLOCK_BYTES).enumerate() {
        let tweakeys = RoundTweakeys::new(&ZERO_TWEAK, &session);
        let mut keystream = nonce.clone();
        tweak_cipher(&mut keystream, counter, domains.keystream, &tweakeys, trace);
        trace.record(Step::Keystream { len: chunk.len() });
        keystream.apply_keystream(chunk);

        if index + 1 < blocks {
            let mut next = nonce.clone();
            tweak_cipher(&mut next, counter, domains.rekey, &tweakeys, trace);
            session = next;
        }
        counter.step();
    }
}

/// Masked tag shares: the digest `(L, R)` of the public inputs, with `R`
/// encrypted under the masked key and `L` as TK2.
pub(crate) fn tag_state<T: Tracer>(
    config: &VariantConfig,
    key: &MaskedBlock,
    nonce: &Block,
    ad: &[u8],
    ciphertext: &[u8],
    trace: &mut T,
) -> MaskedBlock {
    let digest = hash(ad, ciphertext, nonce, trace);
    let tweakeys = RoundTweakeys::new(&digest.left, key);
    let mut tag = MaskedBlock::from_shares(digest.right, [0u8; BLOCK_BYTES]);
    tweak_cipher(&mut tag, Counter::zero(), config.domains().tag, &tweakeys, trace);
    tag
}
