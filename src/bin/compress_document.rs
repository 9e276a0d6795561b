//! Gzip a JSON document into the on-disk format read by `attrcorpus`
//!
//! Usage:
//!   cargo run --bin compress_document -- wsj_0012.conll.json
//!
//! The input is parsed first, so only files that load as a document are
//! written.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use attrcorpus::{save_document, DocumentLoader};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "compress_document")]
#[command(about = "Validate a JSON document and write it gzip-compressed")]
#[command(version)]
struct Args {
    /// JSON document to compress
    input: PathBuf,

    /// Output path (default: input path with `.gz` appended)
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let output = match args.output {
        Some(path) => path,
        None => {
            let mut name = args.input.clone().into_os_string();
            name.push(".gz");
            PathBuf::from(name)
        }
    };
    if output == args.input {
        return Err(anyhow!("Output would overwrite the input: {}", output.display()));
    }

    let document = DocumentLoader::default().load_file(&args.input)?;
    save_document(&output, &document)?;

    log::info!(
        "Compressed document '{}' ({} sentences, {} tokens) to {}",
        document.id,
        document.sentences.len(),
        document.token_count(),
        output.display()
    );
    Ok(())
}
