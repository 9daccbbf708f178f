//! Unmasked Romulus-N/M/T built directly on the reference cipher.

#![allow(dead_code)]

use skinny_core::{encrypt_block, xor_in_place, Block, Tweakey};

const MASK56: u64 = (1 << 56) - 1;

fn step(c: u64) -> u64 {
    let feedback = if (c >> 55) & 1 == 1 { 0x95 } else { 0 };
    ((c << 1) & MASK56) ^ feedback
}

fn tk1(c: u64, domain: u8) -> Block {
    let mut tk = [0u8; 16];
    tk[..7].copy_from_slice(&c.to_le_bytes()[..7]);
    tk[7] = domain;
    tk
}

fn e(state: &Block, c: u64, domain: u8, tk2: &Block, key: &Block) -> Block {
    encrypt_block(state, &Tweakey::new(tk1(c, domain), *tk2, *key))
}

fn g(s: &Block) -> Block {
    core::array::from_fn(|i| (s[i] >> 1) ^ (s[i] & 0x80) ^ (s[i] << 7))
}

fn pad(chunk: &[u8]) -> Block {
    let mut block = [0u8; 16];
    block[..chunk.len()].copy_from_slice(chunk);
    if chunk.len() < 16 {
        block[15] = chunk.len() as u8;
    }
    block
}

fn blocks(data: &[u8]) -> Vec<Block> {
    if data.is_empty() {
        return vec![pad(&[])];
    }
    data.chunks(16).map(pad).collect()
}

fn shape(len: usize) -> (bool, bool) {
    let count = if len == 0 { 1 } else { (len + 15) / 16 };
    (count % 2 == 0, len % 16 != 0 || len == 0)
}

fn absorb(sections: &[(&[u8], u8)], final_domain: u8, nonce: &Block, key: &Block) -> Block {
    let mut s = [0u8; 16];
    let mut c = 1u64;
    let mut index = 0usize;
    for (data, domain) in sections {
        for block in blocks(data) {
            if index % 2 == 0 {
                c = step(c);
                xor_in_place(&mut s, &block);
            } else {
                s = e(&s, c, *domain, &block, key);
                c = step(c);
            }
            index += 1;
        }
    }
    e(&s, c, final_domain, nonce, key)
}

fn rho(s: &mut Block, chunk: &mut [u8], decrypt: bool) {
    let ks = g(s);
    let len = chunk.len();
    for i in 0..len {
        let input = chunk[i];
        chunk[i] = input ^ ks[i];
        s[i] ^= if decrypt { chunk[i] } else { input };
    }
    if len < 16 {
        s[15] ^= len as u8;
    }
}

fn n_message(mut s: Block, data: &mut [u8], nonce: &Block, key: &Block, decrypt: bool) -> Block {
    let count = if data.is_empty() { 1 } else { (data.len() + 15) / 16 };
    let mut c = 1u64;
    for i in 0..count {
        let end = ((i + 1) * 16).min(data.len());
        let chunk = &mut data[i * 16..end];
        let full = chunk.len() == 16;
        rho(&mut s, chunk, decrypt);
        c = step(c);
        let domain = if i + 1 < count { 0x04 } else if full { 0x14 } else { 0x15 };
        s = e(&s, c, domain, nonce, key);
    }
    s
}

/// Romulus-N encryption.
pub fn romulus_n(key: &Block, nonce: &Block, ad: &[u8], message: &[u8]) -> (Vec<u8>, Block) {
    let (_, partial) = shape(ad.len());
    let domain = 0x18 ^ if partial { 0x02 } else { 0 };
    let s = absorb(&[(ad, 0x08)], domain, nonce, key);
    let mut out = message.to_vec();
    let s = n_message(s, &mut out, nonce, key, false);
    (out, g(&s))
}

fn m_stream(tag: &Block, data: &mut [u8], nonce: &Block, key: &Block, decrypt: bool) {
    let mut s = *tag;
    let mut c = 1u64;
    for chunk in data.chunks_mut(16) {
        s = e(&s, c, 0x24, nonce, key);
        rho(&mut s, chunk, decrypt);
        c = step(c);
    }
}

/// Romulus-M encryption.
pub fn romulus_m(key: &Block, nonce: &Block, ad: &[u8], message: &[u8]) -> (Vec<u8>, Block) {
    let (ad_even, ad_partial) = shape(ad.len());
    let (m_even, m_partial) = shape(message.len());
    let mut domain = 0x30;
    domain ^= if ad_even { 0x08 } else { 0 };
    domain ^= if ad_partial { 0x02 } else { 0 };
    domain ^= if m_even { 0x04 } else { 0 };
    domain ^= if m_partial { 0x01 } else { 0 };
    let s = absorb(&[(ad, 0x28), (message, 0x2c)], domain, nonce, key);
    let tag = g(&s);
    let mut out = message.to_vec();
    m_stream(&tag, &mut out, nonce, key, false);
    (out, tag)
}

fn ipad(out: &mut Vec<u8>, data: &[u8]) {
    out.extend_from_slice(data);
    if data.is_empty() {
        out.extend_from_slice(&[0u8; 16]);
    } else if data.len() % 16 != 0 {
        let r = data.len() % 16;
        out.extend(std::iter::repeat(0u8).take(15 - r));
        out.push(r as u8);
    }
}

fn hash(ad: &[u8], ct: &[u8], nonce: &Block) -> (Block, Block) {
    let mut y = Vec::new();
    ipad(&mut y, ad);
    ipad(&mut y, ct);
    y.extend_from_slice(nonce);
    y.extend_from_slice(&(ad.len() as u64).to_le_bytes());
    y.extend_from_slice(&(ct.len() as u64).to_le_bytes());
    if y.len() % 32 != 0 {
        y.extend_from_slice(&[0u8; 15]);
        y.push(16);
    }
    let mut l = [0u8; 16];
    let mut r = [0u8; 16];
    let count = y.len() / 32;
    for (i, b) in y.chunks(32).enumerate() {
        if i + 1 == count {
            l[0] ^= 2;
        }
        let mut l1 = l;
        l1[0] ^= 1;
        let mut tk2 = [0u8; 16];
        let mut tk3 = [0u8; 16];
        tk2.copy_from_slice(&b[..16]);
        tk3.copy_from_slice(&b[16..]);
        let tk = Tweakey::new(r, tk2, tk3);
        let mut nl = encrypt_block(&l, &tk);
        xor_in_place(&mut nl, &l);
        let mut nr = encrypt_block(&l1, &tk);
        xor_in_place(&mut nr, &l1);
        l = nl;
        r = nr;
    }
    (l, r)
}

/// Romulus-T encryption.
pub fn romulus_t(key: &Block, nonce: &Block, ad: &[u8], message: &[u8]) -> (Vec<u8>, Block) {
    let zero = [0u8; 16];
    let mut z = e(nonce, 0, 0x42, &zero, key);
    let mut out = message.to_vec();
    let count = (out.len() + 15) / 16;
    let mut c = 1u64;
    for (i, chunk) in out.chunks_mut(16).enumerate() {
        let ks = e(nonce, c, 0x40, &zero, &z);
        for (b, k) in chunk.iter_mut().zip(ks.iter()) {
            *b ^= k;
        }
        if i + 1 < count {
            z = e(nonce, c, 0x41, &zero, &z);
        }
        c = step(c);
    }
    let (l, r) = hash(ad, &out, nonce);
    let tag = e(&r, 0, 0x44, &l, key);
    (out, tag)
}
