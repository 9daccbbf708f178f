//! Tag release and constant-time verification.

use subtle::ConstantTimeEq;

use crate::aead::feedback::g;
use crate::share::MaskedBlock;
use crate::trace::{Step, Tracer};
use crate::{Tag, VariantConfig, TAG_BYTES};

/// Turns the final state into masked tag shares (`G` per share for N and M).
pub(crate) fn tag_shares(config: &VariantConfig, mut state: MaskedBlock) -> MaskedBlock {
    if config.linear_finalization() {
        state.map_linear(g);
    }
    state
}

/// Releases the tag. This is the only point where shares are recombined.
pub(crate) fn release_tag(tag: &MaskedBlock) -> Tag {
    tag.unmask()
}

/// Compares masked tag shares against a received tag without unmasking:
/// `acc |= (t0[i] ^ tag[i]) ^ t1[i]`, then a constant-time test for zero.
pub(crate) fn verify_tag<T: Tracer>(computed: &MaskedBlock, received: &Tag, trace: &mut T) -> bool {
    trace.record(Step::Verify);
    let t0 = computed.share(0);
    let t1 = computed.share(1);
    let mut acc = 0u8;
    for i in 0..TAG_BYTES {
        acc |= (t0[i] ^ received[i]) ^ t1[i];
    }
    acc.ct_eq(&0).into()
}
