//! Hirose double-block-length hash over public data, used by Romulus-T.
//!
//! Everything hashed here (associated data, ciphertext, nonce, lengths) is
//! public, so the unmasked reference cipher is used.

use skinny_core::{encrypt_block, xor_in_place, Block, Tweakey, BLOCK_BYTES};

use crate::trace::{Step, Tracer};

const HASH_BLOCK_BYTES: usize = 2 * BLOCK_BYTES;

/// Two-block chaining value `(L, R)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Digest {
    pub(crate) left: Block,
    pub(crate) right: Block,
}

/// Pads a section to a multiple of 16 bytes; a short tail records its length
/// in the last byte and an empty section becomes one zero block.
fn pad_section(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
    let tail = data.len() % BLOCK_BYTES;
    if data.is_empty() {
        out.extend_from_slice(&[0u8; BLOCK_BYTES]);
    } else if tail != 0 {
        out.resize(out.len() + BLOCK_BYTES - tail - 1, 0);
        out.push(tail as u8);
    }
}

/// Hash input: `pad(A) || pad(C) || N || le64(|A|) || le64(|C|)`, padded to
/// a multiple of 32 bytes with a trailing length byte of 16.
pub(crate) fn hash_input(ad: &[u8], ciphertext: &[u8], nonce: &Block) -> Vec<u8> {
    let mut input = Vec::with_capacity(ad.len() + ciphertext.len() + 4 * BLOCK_BYTES);
    pad_section(&mut input, ad);
    pad_section(&mut input, ciphertext);
    input.extend_from_slice(nonce);
    input.extend_from_slice(&(ad.len() as u64).to_le_bytes());
    input.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    if input.len() % HASH_BLOCK_BYTES != 0 {
        input.resize(input.len() + BLOCK_BYTES - 1, 0);
        input.push(BLOCK_BYTES as u8);
    }
    input
}

fn compress(digest: &mut Digest, chunk: &[u8]) {
    let mut tk2 = [0u8; BLOCK_BYTES];
    let mut tk3 = [0u8; BLOCK_BYTES];
    tk2.copy_from_slice(&chunk[..BLOCK_BYTES]);
    tk3.copy_from_slice(&chunk[BLOCK_BYTES..]);
    let tweakey = Tweakey::new(digest.right, tk2, tk3);

    let left = digest.left;
    let mut left1 = left;
    left1[0] ^= 0x01;

    let mut new_left = encrypt_block(&left, &tweakey);
    xor_in_place(&mut new_left, &left);
    let mut new_right = encrypt_block(&left1, &tweakey);
    xor_in_place(&mut new_right, &left1);

    digest.left = new_left;
    digest.right = new_right;
}

/// Hashes associated data, ciphertext and nonce into a 256-bit digest.
pub(crate) fn hash<T: Tracer>(ad: &[u8], ciphertext: &[u8], nonce: &Block, trace: &mut T) -> Digest {
    let input = hash_input(ad, ciphertext, nonce);
    let mut digest = Digest {
        left: [0u8; BLOCK_BYTES],
        right: [0u8; BLOCK_BYTES],
    };
    let blocks = input.len() / HASH_BLOCK_BYTES;
    for (index, chunk) in input.chunks_exact(HASH_BLOCK_BYTES).enumerate() {
        if index + 1 == blocks {
            digest.left[0] ^= 0x02;
        }
        compress(&mut digest, chunk);
        trace.record(Step::Compress);
    }
    digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_fill_exactly_two_hash_blocks() {
        let input = hash_input(&[], &[], &[0xaa; 16]);
        assert_eq!(input.len(), 64);
        assert_eq!(&input[..32], &[0u8; 32]);
        assert_eq!(&input[32..48], &[0xaa; 16]);
        assert_eq!(&input[48..], &[0u8; 16]);
    }

    #[test]
    fn odd_block_count_gets_length_padding() {
        let input = hash_input(&[1u8; 16], &[2u8; 32], &[3u8; 16]);
        // 16 + 32 + 16 + 16 = 80 bytes, padded to 96.
        assert_eq!(input.len(), 96);
        assert_eq!(input[95], 16);
        assert!(input[80..95].iter().all(|&b| b == 0));
    }

    #[test]
    fn short_sections_record_their_tail_length() {
        let input = hash_input(&[9u8; 3], &[], &[0u8; 16]);
        assert_eq!(&input[..3], &[9, 9, 9]);
        assert_eq!(input[15], 3);
        assert_eq!(&input[32..40], &[0u8; 8]);
        assert_eq!(&input[48..56], &3u64.to_le_bytes());
    }

    #[test]
    fn section_boundaries_are_unambiguous() {
        let nonce = [0u8; 16];
        let a = hash(&[], &[0u8; 16], &nonce, &mut ());
        let b = hash(&[0u8; 16], &[], &nonce, &mut ());
        assert_ne!(a, b);
    }

    #[test]
    fn compression_count_follows_input_length() {
        let mut trace = Vec::new();
        hash(&[0u8; 5], &[0u8; 40], &[0u8; 16], &mut trace);
        // 16 + 48 + 16 + 16 = 96 bytes: three compressions.
        assert_eq!(trace.len(), 3);
    }
}
