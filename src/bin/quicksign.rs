use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::error;

use quicksign::api::{Alias, DEFAULT_KEY_DIR};

#[derive(Parser, Debug)]
#[command(name = "quicksign")]
#[command(about = "Offline document signing over QR payloads", version)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Directory holding the signing keys
    #[arg(long, global = true, env = "QUICKSIGN_KEY_DIR", default_value = DEFAULT_KEY_DIR)]
    pub key_dir: PathBuf,

    /// Alias of the signing key
    #[arg(long, global = true, env = "QUICKSIGN_ALIAS", default_value = "quicksign_signer")]
    pub alias: Alias,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the certificate QR payload, creating the key on first use
    Certificate,

    /// Print the SHA-256 fingerprint of the certificate
    Fingerprint,

    /// Sign a file; prints the certificate payload, then the signature payload
    Sign {
        /// File to sign
        file: PathBuf,
    },

    /// Check a certificate/signature payload pair against a local file
    Verify {
        /// Certificate QR payload
        #[arg(long)]
        certificate: String,

        /// Signature QR payload
        #[arg(long)]
        signature: String,

        /// Local copy of the signed file
        file: PathBuf,
    },

    /// Read decoded QR payloads from stdin, one per line, and pair them
    Scan {
        /// Local reference copy of the document being checked
        #[arg(long)]
        document: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Certificate => {
            let payload = quicksign::certificate_payload(&cli.key_dir, cli.alias)
                .context("failed to obtain certificate")?;
            println!("{}", payload);
        }

        Commands::Fingerprint => {
            let fingerprint = quicksign::certificate_fingerprint(&cli.key_dir, cli.alias)
                .context("failed to obtain certificate")?;
            println!("{}", fingerprint);
        }

        Commands::Sign { file } => {
            let proof = quicksign::sign_document(&cli.key_dir, cli.alias, &file)
                .with_context(|| format!("failed to sign {}", file.display()))?;
            println!("{}", proof.certificate);
            println!("{}", proof.signature);
        }

        Commands::Verify {
            certificate,
            signature,
            file,
        } => {
            let document = std::fs::read(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let result = quicksign::verify_payloads(&certificate, &signature, &document);
            println!("{}", result);
            if !result.is_valid() {
                error!("Verification of {} failed: {}", file.display(), result);
                std::process::exit(1);
            }
        }

        Commands::Scan { document } => {
            let payloads = io::stdin()
                .lock()
                .lines()
                .collect::<Result<Vec<_>, _>>()
                .context("failed to read payloads from stdin")?;

            let mut session = quicksign::new_pairing_session(document);
            let payloads = payloads.iter().map(|line| line.trim()).filter(|line| !line.is_empty());
            for transition in session.process_all(payloads) {
                println!("{}", transition);
            }
        }
    }

    Ok(())
}
