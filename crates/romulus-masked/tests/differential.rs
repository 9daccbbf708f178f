mod common;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use romulus_masked::{Romulus, Variant};

fn reference(variant: Variant, key: &[u8; 16], nonce: &[u8; 16], ad: &[u8], msg: &[u8]) -> (Vec<u8>, [u8; 16]) {
    match variant {
        Variant::N => common::romulus_n(key, nonce, ad, msg),
        Variant::M => common::romulus_m(key, nonce, ad, msg),
        Variant::T => common::romulus_t(key, nonce, ad, msg),
    }
}

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::N), Just(Variant::M), Just(Variant::T)]
}

#[test]
fn boundary_lengths_match_reference() {
    let lengths = [0usize, 1, 15, 16, 17, 31, 32, 33, 48, 63, 64, 65];
    let key = [0x2bu8; 16];
    let nonce = [0x7eu8; 16];
    for variant in Variant::ALL {
        let mut romulus = Romulus::new(variant, ChaCha20Rng::seed_from_u64(40));
        for &ad_len in &lengths {
            for &msg_len in &lengths {
                let ad: Vec<u8> = (0..ad_len).map(|i| (i * 7) as u8).collect();
                let msg: Vec<u8> = (0..msg_len).map(|i| (i * 13 + 1) as u8).collect();
                let expected = reference(variant, &key, &nonce, &ad, &msg);
                let actual = romulus.encrypt(&key, &nonce, &ad, &msg).unwrap();
                assert_eq!(actual, expected, "Romulus-{variant} ad={ad_len} msg={msg_len}");
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn masked_matches_reference(
        variant in variant_strategy(),
        key in any::<[u8; 16]>(),
        nonce in any::<[u8; 16]>(),
        ad in proptest::collection::vec(any::<u8>(), 0..70),
        msg in proptest::collection::vec(any::<u8>(), 0..70),
        seed in any::<u64>(),
    ) {
        let mut romulus = Romulus::new(variant, ChaCha20Rng::seed_from_u64(seed));
        let expected = reference(variant, &key, &nonce, &ad, &msg);
        let actual = romulus.encrypt(&key, &nonce, &ad, &msg).unwrap();
        prop_assert_eq!(actual, expected);
    }
}
