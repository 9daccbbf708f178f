//! Command-line interface for `romulus-masked`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use romulus_masked::{Key, Nonce, Romulus, RomulusError, SealedMessage, Variant};
use tracing::{debug, info};

/// Masked Romulus AEAD CLI.
#[derive(Parser)]
#[command(
    name = "romulus",
    version,
    author,
    about = "First-order masked Romulus-N/M/T authenticated encryption"
)]
struct Cli {
    /// Log library and command activity to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file into a sealed envelope.
    Seal {
        /// Romulus variant: n, m or t.
        #[arg(long, default_value = "n")]
        variant: Variant,
        /// 128-bit key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// 128-bit nonce as 32 hex characters; drawn from the OS when omitted.
        #[arg(long, value_name = "HEX")]
        nonce_hex: Option<String>,
        /// Associated data as hex.
        #[arg(long, value_name = "HEX", default_value = "")]
        ad_hex: String,
        /// Plaintext input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output path for the serialized envelope.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Optional RNG seed for reproducible masks. Never affects the nonce.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Authenticate and decrypt a sealed envelope.
    Open {
        /// 128-bit key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Serialized envelope.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        /// Optional RNG seed for reproducible masks.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check that outputs do not depend on the masks and that forgeries fail.
    Check {
        /// Restrict the check to one variant.
        #[arg(long)]
        variant: Option<Variant>,
        /// Number of random samples per variant.
        #[arg(long, default_value_t = 16)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key and message, seal, open, compare.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Seal {
            variant,
            key_hex,
            nonce_hex,
            ad_hex,
            input,
            output,
            seed,
        } => cmd_seal(
            variant,
            &key_hex,
            nonce_hex.as_deref(),
            &ad_hex,
            &input,
            &output,
            seed,
        ),
        Commands::Open {
            key_hex,
            input,
            output,
            seed,
        } => cmd_open(&key_hex, &input, &output, seed),
        Commands::Check {
            variant,
            samples,
            seed,
        } => cmd_check(variant, samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_seal(
    variant: Variant,
    key_hex: &str,
    nonce_hex: Option<&str>,
    ad_hex: &str,
    input: &Path,
    output: &Path,
    seed: Option<u64>,
) -> Result<()> {
    let key = parse_block_hex(key_hex, "key")?;
    let ad = hex::decode(ad_hex.trim()).context("decode associated data hex")?;
    let nonce = seal_nonce(nonce_hex)?;
    let plaintext = fs::read(input).with_context(|| format!("read {}", input.display()))?;

    let mut romulus = Romulus::new(variant, seeded_rng(seed));
    let sealed = SealedMessage::seal(&mut romulus, &key, &nonce, &ad, &plaintext)
        .context("encrypt input")?;
    let bytes = sealed.to_bytes().context("serialize envelope")?;
    fs::write(output, bytes).with_context(|| format!("write {}", output.display()))?;
    info!(
        variant = %variant,
        nonce = %hex::encode(nonce),
        bytes = plaintext.len(),
        "sealed"
    );
    Ok(())
}

fn cmd_open(key_hex: &str, input: &Path, output: &Path, seed: Option<u64>) -> Result<()> {
    let key = parse_block_hex(key_hex, "key")?;
    let bytes = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let sealed = SealedMessage::from_bytes(&bytes).context("deserialize envelope")?;
    let mut romulus = Romulus::new(sealed.variant, seeded_rng(seed));
    let plaintext = match sealed.open(&mut romulus, &key) {
        Ok(plaintext) => plaintext,
        Err(RomulusError::AuthenticationFailure) => {
            bail!("authentication failed: wrong key or tampered envelope")
        }
        Err(err) => return Err(err).context("decrypt envelope"),
    };
    fs::write(output, &plaintext).with_context(|| format!("write {}", output.display()))?;
    info!(variant = %sealed.variant, bytes = plaintext.len(), "opened");
    Ok(())
}

fn cmd_check(variant: Option<Variant>, samples: usize, seed: Option<u64>) -> Result<()> {
    let variants = match variant {
        Some(v) => vec![v],
        None => Variant::ALL.to_vec(),
    };
    let mut rng = seeded_rng(seed);

    for variant in variants {
        let mut first = Romulus::new(variant, ChaCha20Rng::from_seed(derive_seed(&mut rng)));
        let mut second = Romulus::new(variant, ChaCha20Rng::from_seed(derive_seed(&mut rng)));
        for sample in 0..samples {
            let key = random_block(&mut rng);
            let nonce = random_block(&mut rng);
            let ad = random_bytes(&mut rng, sample * 7 % 50);
            let message = random_bytes(&mut rng, sample * 11 % 70);

            let a = first.seal(&key, &nonce, &ad, &message)?;
            let b = second.seal(&key, &nonce, &ad, &message)?;
            if a != b {
                bail!("Romulus-{variant}: output depends on the masks (sample {sample})");
            }
            if second.open(&key, &nonce, &ad, &a)? != message {
                bail!("Romulus-{variant}: roundtrip failed (sample {sample})");
            }

            let mut forged = a;
            let index = (rng.next_u32() as usize) % forged.len();
            forged[index] ^= 1 << (rng.next_u32() % 8);
            match first.open(&key, &nonce, &ad, &forged) {
                Err(RomulusError::AuthenticationFailure) => {}
                Ok(_) => bail!("Romulus-{variant}: forgery accepted (sample {sample})"),
                Err(err) => return Err(err.into()),
            }
        }
        debug!(variant = %variant, samples, "check passed");
        println!("Romulus-{variant}: {samples} samples ok");
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key = random_block(&mut rng);
    let nonce = random_block(&mut rng);
    let message = random_bytes(&mut rng, 40);
    println!("demo key: {}", hex::encode(key));
    println!("nonce: {}", hex::encode(nonce));
    println!("plaintext: {}", hex::encode(&message));

    for variant in Variant::ALL {
        let mut romulus = Romulus::new(variant, ChaCha20Rng::from_seed(derive_seed(&mut rng)));
        let sealed = SealedMessage::seal(&mut romulus, &key, &nonce, b"demo", &message)?;
        let opened = sealed.open(&mut romulus, &key)?;
        println!(
            "Romulus-{variant}: ciphertext {} tag {}",
            hex::encode(&sealed.ciphertext),
            hex::encode(sealed.tag)
        );
        if opened != message {
            bail!("Romulus-{variant}: demo roundtrip failed");
        }
    }
    Ok(())
}

fn parse_block_hex(hex_str: &str, what: &str) -> Result<[u8; 16]> {
    let bytes = hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))?;
    if bytes.len() != 16 {
        bail!("{what} must be 16 bytes (32 hex characters)");
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    Ok(block)
}

fn random_block(rng: &mut impl RngCore) -> Key {
    let mut block = [0u8; 16];
    rng.fill_bytes(&mut block);
    block
}

/// Parses an explicit nonce or draws a fresh one from the OS, so a reused
/// `--seed` cannot repeat a nonce under the same key.
fn seal_nonce(nonce_hex: Option<&str>) -> Result<Nonce> {
    match nonce_hex {
        Some(text) => parse_block_hex(text, "nonce"),
        None => {
            let mut nonce = [0u8; 16];
            rand::rngs::OsRng
                .try_fill_bytes(&mut nonce)
                .context("draw nonce from the operating system")?;
            Ok(nonce)
        }
    }
}

fn random_bytes(rng: &mut impl RngCore, len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    bytes
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}

fn derive_seed(rng: &mut impl RngCore) -> [u8; 32] {
    let mut seed_bytes = [0u8; 32];
    rng.fill_bytes(&mut seed_bytes);
    seed_bytes
}
