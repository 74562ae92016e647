//! Encode review text into classifier input ids.
//!
//! Loads `metadata.json` and `vocab.json`, then prints one JSON line per text:
//!
//! ```json
//! {"ids":[1,13,0,0,0],"truncated":false}
//! ```
//!
//! Texts come from repeated `--text` flags, or one per line on stdin when no
//! `--text` is given. Logs go to stderr; stdout carries only JSON.
//!
//! Exit code 0 on success, non-zero if the assets fail to load or validate.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use sentiment_rs::{SequenceEncoder, assets};

#[derive(Parser, Debug)]
#[command(
    name = "sentiment-encode",
    about = "Encode text into fixed-length sentiment classifier input",
    long_about = "Encode text into the fixed-length id sequence the sentiment classifier expects.\n\
                  Reads metadata.json and vocab.json from --assets, or from --metadata/--vocab.\n\
                  Prints one JSON object per input text to stdout."
)]
struct Args {
    /// Directory containing metadata.json and vocab.json.
    #[arg(long, short = 'a')]
    assets: Option<PathBuf>,

    /// Path to metadata.json (overrides --assets).
    #[arg(long, requires = "vocab")]
    metadata: Option<PathBuf>,

    /// Path to vocab.json (overrides --assets).
    #[arg(long, requires = "metadata")]
    vocab: Option<PathBuf>,

    /// Text to encode. Repeat for several texts; omit to read stdin lines.
    #[arg(long, short = 't')]
    text: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let encoder = load_encoder(&args)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.text.is_empty() {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("reading stdin")?;
            emit(&encoder, &line, &mut out)?;
        }
    } else {
        for text in &args.text {
            emit(&encoder, text, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn load_encoder(args: &Args) -> anyhow::Result<SequenceEncoder> {
    let encoder = match (&args.metadata, &args.vocab, &args.assets) {
        (Some(metadata), Some(vocab), _) => assets::load_files(metadata, vocab)
            .with_context(|| format!("loading {} and {}", metadata.display(), vocab.display()))?,
        (_, _, Some(dir)) => assets::load_dir(dir)
            .with_context(|| format!("loading assets from {}", dir.display()))?,
        _ => bail!("pass --assets <dir>, or both --metadata and --vocab"),
    };
    tracing::info!(
        words = encoder.vocab().len(),
        max_len = encoder.max_len(),
        "encoder ready"
    );
    Ok(encoder)
}

fn emit(encoder: &SequenceEncoder, text: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let seq = encoder.encode(text);
    if seq.truncated() {
        tracing::debug!(
            bytes = text.len(),
            "input exceeded max_len, trailing words dropped"
        );
    }
    serde_json::to_writer(&mut *out, &seq)?;
    writeln!(out)?;
    Ok(())
}
