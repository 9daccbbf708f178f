//! Message encryption pass for Romulus-N and Romulus-M.

use skinny_core::BLOCK_BYTES;

use crate::aead::feedback::{feedback, Direction};
use crate::aead::tweak_cipher;
use crate::schedule::{Counter, RoundTweakeys};
use crate::share::MaskedBlock;
use crate::trace::{Step, Tracer};
use crate::VariantConfig;

/// Romulus-N: feedback first, then a cipher call whose domain marks the last
/// block and whether it was full. An empty message is one empty block.
pub(crate) fn stream_pass<T: Tracer>(
    config: &VariantConfig,
    state: &mut MaskedBlock,
    tweakeys: &RoundTweakeys,
    data: &mut [u8],
    direction: Direction,
    trace: &mut T,
) {
    let domains = config.domains();
    let len = data.len();
    let blocks = len.div_ceil(BLOCK_BYTES).max(1);
    let mut counter = Counter::start();
    for index in 0..blocks {
        let start = index * BLOCK_BYTES;
        let end = (start + BLOCK_BYTES).min(len);
        let chunk = &mut data[start..end];
        trace.record(Step::Feedback { len: chunk.len() });
        feedback(state, chunk, direction);
        counter.step();

        let domain = if index + 1 < blocks {
            domains.message_block
        } else if end - start == BLOCK_BYTES {
            domains.message_last_full
        } else {
            domains.message_last_partial
        };
        tweak_cipher(state, counter, domain, tweakeys, trace);
    }
}

/// Romulus-M: a cipher call first, then feedback. Starts from the tag state;
/// an empty message makes no calls.
pub(crate) fn synthetic_pass<T: Tracer>(
    config: &VariantConfig,
    state: &mut MaskedBlock,
    tweakeys: &RoundTweakeys,
    data: &mut [u8],
    direction: Direction,
    trace: &mut T,
) {
    let domain = config.domains().message_block;
    let mut counter = Counter::start();
    for chunk in data.chunks_mut(BLOCK_BYTES) {
        tweak_cipher(state, counter, domain, tweakeys, trace);
        trace.record(Step::Feedback { len: chunk.len() });
        feedback(state, chunk, direction);
        counter.step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher_domains(trace: &[Step]) -> Vec<u8> {
        trace
            .iter()
            .filter_map(|step| match step {
                Step::Cipher { domain, .. } => Some(*domain),
                _ => None,
            })
            .collect()
    }

    fn run_stream(len: usize) -> Vec<Step> {
        let config = VariantConfig::ROMULUS_N;
        let mut state = MaskedBlock::from_shares([0; 16], [0; 16]);
        let key = MaskedBlock::from_shares([0; 16], [0; 16]);
        let tweakeys = RoundTweakeys::new(&[0; 16], &key);
        let mut data = vec![0u8; len];
        let mut trace = Vec::new();
        stream_pass(&config, &mut state, &tweakeys, &mut data, Direction::Encrypt, &mut trace);
        trace
    }

    #[test]
    fn empty_message_is_one_padded_block() {
        let trace = run_stream(0);
        assert_eq!(trace[0], Step::Feedback { len: 0 });
        assert_eq!(cipher_domains(&trace), vec![0x15]);
    }

    #[test]
    fn thirty_three_bytes_end_with_single_byte_block() {
        let trace = run_stream(33);
        let feedback_lens: Vec<usize> = trace
            .iter()
            .filter_map(|step| match step {
                Step::Feedback { len } => Some(*len),
                _ => None,
            })
            .collect();
        assert_eq!(feedback_lens, vec![16, 16, 1]);
        assert_eq!(cipher_domains(&trace), vec![0x04, 0x04, 0x15]);
    }

    #[test]
    fn aligned_message_ends_with_full_domain() {
        assert_eq!(cipher_domains(&run_stream(32)), vec![0x04, 0x14]);
    }

    #[test]
    fn counters_advance_before_each_stream_call() {
        let counters: Vec<u64> = run_stream(48)
            .iter()
            .filter_map(|step| match step {
                Step::Cipher { counter, .. } => Some(*counter),
                _ => None,
            })
            .collect();
        assert_eq!(counters, vec![2, 4, 8]);
    }

    #[test]
    fn synthetic_pass_skips_empty_message() {
        let config = VariantConfig::ROMULUS_M;
        let mut state = MaskedBlock::from_shares([1; 16], [0; 16]);
        let key = MaskedBlock::from_shares([0; 16], [0; 16]);
        let tweakeys = RoundTweakeys::new(&[0; 16], &key);
        let mut trace = Vec::new();
        synthetic_pass(&config, &mut state, &tweakeys, &mut [], Direction::Encrypt, &mut trace);
        assert!(trace.is_empty());
        assert_eq!(state.unmask(), [1u8; 16]);
    }
}
