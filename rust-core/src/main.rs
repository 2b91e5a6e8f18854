//! spectral-stego CLI - hide and recover text in WAV files

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

use spectral_stego::analysis::QualityReport;
use spectral_stego::message::MARKER_LEN;
use spectral_stego::pipeline::{embed_file, extract_file, CARRIER_CHANNEL};
use spectral_stego::{
    bit_error_rate, read_wav, Extraction, Method, StegoCodec, StegoConfig, Strategy,
};

/// Transform-domain audio steganography
#[derive(Parser, Debug)]
#[command(name = "spectral-stego")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file overriding codec parameters
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hide a message in channel 0 of a WAV file
    Embed {
        /// Embedding method
        #[arg(short, long, value_enum, default_value_t = MethodArg::Dwt)]
        method: MethodArg,

        /// Carrier WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the stego WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Text to hide (8-bit characters)
        #[arg(long)]
        message: String,
    },

    /// Recover a message from channel 0 of a WAV file
    Extract {
        /// Method the message was embedded with
        #[arg(short, long, value_enum, default_value_t = MethodArg::Dwt)]
        method: MethodArg,

        /// Stego WAV file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show how many characters each method can hide in a file
    Capacity {
        /// Carrier WAV file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Run every method on one file and report distortion and recovery
    Compare {
        /// Carrier WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Text to hide
        #[arg(long, default_value = "New Message Test Test")]
        message: String,

        /// Directory for the stego files
        #[arg(long, default_value = "stego_out")]
        out_dir: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum MethodArg {
    Dft,
    Dct,
    Dwt,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Dft => Method::Dft,
            MethodArg::Dct => Method::Dct,
            MethodArg::Dwt => Method::Dwt,
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    // init() also forwards `log` records from the library
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<StegoConfig> {
    match path {
        Some(path) => StegoConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(StegoConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Embed {
            method,
            input,
            output,
            message,
        } => {
            let strategy = Strategy::new(method.into(), &config)?;
            let outcome = embed_file(&strategy, &input, &message, &output)
                .with_context(|| format!("Embedding into {} failed", input.display()))?;

            let original = outcome.original.channel(CARRIER_CHANNEL).unwrap_or_default();
            let modified = outcome.modified.channel(CARRIER_CHANNEL).unwrap_or_default();
            let report = QualityReport::measure(&original, &modified);
            info!(
                "SNR {:.2} dB, PSNR {:.2} dB, MSE {:.3e}",
                report.snr_db, report.psnr_db, report.mse
            );
            println!("Wrote {}", output.display());
        }

        Commands::Extract { method, input } => {
            let strategy = Strategy::new(method.into(), &config)?;
            let extraction = extract_file(&strategy, &input)
                .with_context(|| format!("Reading {} failed", input.display()))?;

            match extraction {
                Extraction::Recovered(message) => println!("{message}"),
                Extraction::Failed(failure) => bail!("{failure}"),
            }
        }

        Commands::Capacity { input } => {
            let clip = read_wav(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            println!(
                "{}: {} frames, {} channels, {} Hz",
                input.display(),
                clip.frame_count(),
                clip.channel_count(),
                clip.sample_rate()
            );

            for method in Method::ALL {
                let strategy = Strategy::new(method, &config)?;
                let slots = strategy.capacity(clip.frame_count());
                let chars = slots.saturating_sub(MARKER_LEN) / 8;
                println!("  {:<4} {:>8} slots  {:>6} chars", method.as_str(), slots, chars);
            }
        }

        Commands::Compare {
            input,
            message,
            out_dir,
        } => {
            println!(
                "{:<5} {:<8} {:>10} {:>10} {:>12} {:>6}",
                "", "result", "SNR dB", "PSNR dB", "MSE", "BER"
            );

            for method in Method::ALL {
                let strategy = Strategy::new(method, &config)?;
                let output = out_dir.join(format!("stego_{method}.wav"));

                let outcome = match embed_file(&strategy, &input, &message, &output) {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        warn!("{} embedding failed: {}", method, e);
                        println!("{:<5} {:<8}", method.as_str(), "error");
                        continue;
                    }
                };

                let extraction = extract_file(&strategy, &output)?;
                let original = outcome.original.channel(CARRIER_CHANNEL).unwrap_or_default();
                let modified = outcome.modified.channel(CARRIER_CHANNEL).unwrap_or_default();
                let report = QualityReport::measure(&original, &modified);

                println!(
                    "{:<5} {:<8} {:>10.2} {:>10.2} {:>12.3e} {:>6.3}",
                    method.as_str(),
                    if extraction.message() == Some(message.as_str()) { "ok" } else { "failed" },
                    report.snr_db,
                    report.psnr_db,
                    report.mse,
                    bit_error_rate(&message, &extraction)
                );
            }
        }
    }

    Ok(())
}
