//! Seals and opens a short message with each Romulus variant.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use romulus_masked::{Romulus, SealedMessage, Variant};

fn main() {
    // Deterministic seed for reproducibility in the example.
    let key = [0x0fu8; 16];
    let nonce = [0xa0u8; 16];
    let associated_data = b"example header";
    let message = b"masked Romulus round trip";

    for variant in Variant::ALL {
        let mut romulus = Romulus::new(variant, ChaCha20Rng::from_seed([1u8; 32]));
        let sealed = SealedMessage::seal(&mut romulus, &key, &nonce, associated_data, message)
            .expect("sealing succeeds");
        let opened = sealed.open(&mut romulus, &key).expect("opening succeeds");
        assert_eq!(&opened[..], &message[..]);
        println!(
            "Romulus-{variant}: ciphertext {} tag {}",
            sealed
                .ciphertext
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<String>(),
            sealed.tag.iter().map(|b| format!("{b:02x}")).collect::<String>()
        );
    }
}
