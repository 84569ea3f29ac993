//! Command-line interface for the AES-128 and SHA-256 reference implementations.

#![forbid(unsafe_code)]

mod avalanche;
mod check;

use std::path::{Path, PathBuf};

use aes_core::{
    aes128_decrypt_equivalent_with, aes128_decrypt_with, aes128_encrypt_with, decrypt_block,
    decrypt_block_equivalent, encrypt_block, expand_decryption_key, expand_key, Aes128Key,
    RecordingObserver, RoundObserver, TracingObserver,
};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha256_core::{
    sha256, sha256_of_bytes, sha256_of_file_with, FileHashConfig, DEFAULT_READ_BUFFER_BLOCKS,
};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter.
const LOG_ENV: &str = "FIPS_LOG";

/// AES-128 / SHA-256 CLI.
#[derive(Parser)]
#[command(
    name = "fips",
    version,
    author,
    about = "AES-128 (FIPS-197) and SHA-256 (FIPS 180-4) reference tool"
)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). FIPS_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a single 16-byte block.
    Encrypt {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
        /// Print the round-by-round listing before the result.
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Decrypt a single 16-byte block.
    Decrypt {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Ciphertext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
        /// Print the round-by-round listing before the result.
        #[arg(long, default_value_t = false)]
        trace: bool,
        /// Use the equivalent inverse cipher.
        #[arg(long, default_value_t = false)]
        equivalent: bool,
    },
    /// Print SHA-256 digests of a string or of files.
    Hash {
        /// Hash this string instead of files.
        #[arg(long, value_name = "STRING", conflicts_with = "files")]
        text: Option<String>,
        /// Files to hash.
        #[arg(value_name = "FILE", required_unless_present = "text")]
        files: Vec<PathBuf>,
        /// Number of 64-byte blocks read per I/O call.
        #[arg(long, default_value_t = DEFAULT_READ_BUFFER_BLOCKS)]
        read_buffer_blocks: usize,
    },
    /// Run the published known-answer vectors.
    Check,
    /// Measure how many output bits change when one input bit flips.
    Avalanche {
        /// Number of random samples.
        #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
        samples: u64,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key + block, encrypt, decrypt both ways, hash.
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
        Commands::Encrypt {
            key_hex,
            block_hex,
            trace,
        } => cmd_encrypt(&key_hex, &block_hex, trace),
        Commands::Decrypt {
            key_hex,
            block_hex,
            trace,
            equivalent,
        } => cmd_decrypt(&key_hex, &block_hex, trace, equivalent),
        Commands::Hash {
            text,
            files,
            read_buffer_blocks,
        } => cmd_hash(text.as_deref(), &files, read_buffer_blocks),
        Commands::Check => cmd_check(),
        Commands::Avalanche { samples, seed } => cmd_avalanche(samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_encrypt(key_hex: &str, block_hex: &str, trace: bool) -> Result<()> {
    let key = parse_hex(key_hex, "key")?;
    let block = parse_hex(block_hex, "block")?;
    let ciphertext = with_observer(trace, |observer| {
        aes128_encrypt_with(&block, &key, observer).context("encrypt block")
    })?;
    println!("{}", hex::encode(ciphertext));
    Ok(())
}

fn cmd_decrypt(key_hex: &str, block_hex: &str, trace: bool, equivalent: bool) -> Result<()> {
    let key = parse_hex(key_hex, "key")?;
    let block = parse_hex(block_hex, "block")?;
    let plaintext = with_observer(trace, |observer| {
        let result = if equivalent {
            aes128_decrypt_equivalent_with(&block, &key, observer)
        } else {
            aes128_decrypt_with(&block, &key, observer)
        };
        result.context("decrypt block")
    })?;
    println!("{}", hex::encode(plaintext));
    Ok(())
}

/// Runs `op` with a recorder when `trace` is set (printing its listing), or with
/// the `tracing` forwarder otherwise.
fn with_observer<T>(
    trace: bool,
    op: impl FnOnce(&mut dyn RoundObserver) -> Result<T>,
) -> Result<T> {
    if trace {
        let mut recorder = RecordingObserver::new();
        let out = op(&mut recorder)?;
        for line in recorder.lines() {
            println!("{line}");
        }
        Ok(out)
    } else {
        op(&mut TracingObserver)
    }
}

fn cmd_hash(text: Option<&str>, files: &[PathBuf], read_buffer_blocks: usize) -> Result<()> {
    if let Some(text) = text {
        println!("{}", sha256_of_bytes(text.as_bytes()));
        return Ok(());
    }
    let config = FileHashConfig { read_buffer_blocks };
    for path in files {
        let digest = hash_file(path, &config)?;
        println!("{digest}  {}", path.display());
    }
    Ok(())
}

fn hash_file(path: &Path, config: &FileHashConfig) -> Result<String> {
    let digest =
        sha256_of_file_with(path, config).with_context(|| format!("hash {}", path.display()))?;
    Ok(digest.to_hex())
}

fn cmd_check() -> Result<()> {
    let outcomes = check::run()?;
    let mut failed = 0usize;
    for outcome in &outcomes {
        let status = if outcome.passed { "ok" } else { "FAILED" };
        println!("{status:>6}  {}", outcome.name);
        if !outcome.passed {
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{failed} of {} known-answer checks failed", outcomes.len());
    }
    tracing::info!(checks = outcomes.len(), "all known-answer checks passed");
    Ok(())
}

fn cmd_avalanche(samples: u64, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let report = avalanche::measure(&mut rng, samples);
    println!("samples: {}", report.samples);
    println!(
        "aes128: {:.2} of 128 bits ({:.1}%)",
        report.aes_mean_bits,
        report.aes_ratio() * 100.0
    );
    println!(
        "sha256: {:.2} of 256 bits ({:.1}%)",
        report.sha256_mean_bits,
        report.sha256_ratio() * 100.0
    );
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; 16];
    let mut block = [0u8; 16];
    rng.fill_bytes(&mut key_bytes);
    rng.fill_bytes(&mut block);

    let schedule = expand_key(&Aes128Key::from(key_bytes));
    let ciphertext = encrypt_block(&block, &schedule);
    let decrypted = decrypt_block(&ciphertext, &schedule);
    let decrypted_eq = decrypt_block_equivalent(&ciphertext, &expand_decryption_key(&schedule));

    println!("demo key: {}", hex::encode(key_bytes));
    println!("plaintext: {}", hex::encode(block));
    println!("ciphertext: {}", hex::encode(ciphertext));
    println!("decrypted: {}", hex::encode(decrypted));
    println!("sha256(plaintext): {}", sha256(&block));
    if decrypted != block || decrypted_eq != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_hex(hex_str: &str, what: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str.trim()).with_context(|| format!("decode {what} hex"))
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
