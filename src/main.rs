use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use attrcorpus::report::frequency::{count_layer, FrequencyTable};
use attrcorpus::report::inspect;
use attrcorpus::{
    AnnotationLayer, CorpusSummary, Document, DocumentLoader, DocumentSummary, ReportConfig,
};
use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser, Debug)]
#[command(name = "attrcorpus")]
#[command(about = "Statistics over serialized attribution-annotated documents")]
#[command(version)]
struct Args {
    /// YAML report configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// File name suffix of document files (overrides the config)
    #[arg(short, long, global = true)]
    suffix: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Show a progress bar while loading directories
    #[arg(long, global = true)]
    progress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Statistics and a look inside one document file
    Show {
        file: PathBuf,

        /// Number of sentences to print
        #[arg(long)]
        sentences: Option<usize>,

        /// Number of tokens of the first sentence to print
        #[arg(long)]
        tokens: Option<usize>,

        /// Print the phrase rooted at a head token, as SENTENCE:TOKEN_ID
        #[arg(long, value_parser = parse_head_ref)]
        phrase: Option<(usize, String)>,
    },
    /// Per-document counts and corpus totals for a directory
    Summary { dir: PathBuf },
    /// Most frequent annotated spans across a directory
    Freq {
        dir: PathBuf,

        /// Layer to count; repeat for several (default: from config)
        #[arg(short, long)]
        layer: Vec<AnnotationLayer>,

        /// Number of entries per table
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
}

fn parse_head_ref(value: &str) -> Result<(usize, String), String> {
    let (sentence, token) = value
        .split_once(':')
        .ok_or_else(|| format!("expected SENTENCE:TOKEN_ID, got '{}'", value))?;
    let sentence = sentence
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid sentence index '{}': {}", sentence, e))?;
    let token = token.trim();
    if token.is_empty() {
        return Err("token id must not be empty".to_string());
    }
    Ok((sentence, token.to_string()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = match &args.config {
        Some(path) => ReportConfig::from_yaml(path)?,
        None => ReportConfig::default(),
    }
    .with_suffix(args.suffix.clone())?;
    let loader = DocumentLoader::new(config.file_suffix.clone()).with_progress(args.progress);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Show { file, sentences, tokens, phrase } => {
            let sentences = sentences.unwrap_or(config.show_sentences);
            let tokens = tokens.unwrap_or(config.show_tokens);
            show(&mut out, &loader, &file, sentences, tokens, phrase)?;
        }
        Command::Summary { dir } => summary(&mut out, &loader, &dir)?,
        Command::Freq { dir, layer, top } => {
            let layers = if layer.is_empty() { config.layers.clone() } else { layer };
            let top_n = top.unwrap_or(config.top_n);
            freq(&mut out, &loader, &dir, &layers, top_n)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn show<W: Write>(
    out: &mut W,
    loader: &DocumentLoader,
    file: &Path,
    sentences: usize,
    tokens: usize,
    phrase: Option<(usize, String)>,
) -> Result<()> {
    let doc = loader.load_file(file)?;

    writeln!(out, "=== Document {} ===", doc.id)?;
    write!(out, "{}", DocumentSummary::from_document(&doc))?;

    writeln!(out, "\n--- Sentences ---")?;
    inspect::write_sentences(out, &doc, sentences)?;

    if !doc.sentences.is_empty() {
        writeln!(out, "\n--- Tokens of sentence 0 ---")?;
        inspect::write_tokens(out, &doc, 0, tokens)?;
    }

    if !doc.attr_relations.is_empty() {
        writeln!(out, "\n--- Attribution relations ---")?;
        inspect::write_relations(out, &doc)?;
    }

    if let Some((sentence_idx, head)) = phrase {
        let text = doc.get_sentence(sentence_idx)?.phrase_text(&head)?;
        writeln!(out, "\n--- Phrase rooted at {}:{} ---", sentence_idx, head)?;
        writeln!(out, "{}", text)?;
    }

    let mismatches = inspect::warn_offset_mismatches(&doc);
    if mismatches > 0 {
        info!("{} tokens do not match their offsets", mismatches);
    }
    Ok(())
}

/// Load every document of a directory, failing when there is none.
fn load_corpus(loader: &DocumentLoader, dir: &Path) -> Result<Vec<(String, Document)>> {
    let documents = loader.load_directory(dir)?;
    if documents.is_empty() {
        return Err(anyhow!(
            "No files ending in '{}' found in {}",
            loader.suffix(),
            dir.display()
        ));
    }
    Ok(documents)
}

fn summary<W: Write>(out: &mut W, loader: &DocumentLoader, dir: &Path) -> Result<()> {
    let documents = load_corpus(loader, dir)?;

    writeln!(
        out,
        "{:<24} {:>9} {:>8} {:>7} {:>7} {:>9}",
        "source", "sentences", "tokens", "events", "claims", "relations"
    )?;
    let mut corpus = CorpusSummary::new();
    for (source_id, doc) in &documents {
        let s = corpus.add(doc);
        writeln!(
            out,
            "{:<24} {:>9} {:>8} {:>7} {:>7} {:>9}",
            source_id, s.sentences, s.tokens, s.events, s.claims, s.attr_relations
        )?;
    }

    writeln!(out, "\n=== Corpus totals ===")?;
    write!(out, "{}", corpus)?;
    Ok(())
}

fn freq<W: Write>(
    out: &mut W,
    loader: &DocumentLoader,
    dir: &Path,
    layers: &[AnnotationLayer],
    top_n: usize,
) -> Result<()> {
    let documents = load_corpus(loader, dir)?;
    info!("Counting {} layers over {} documents", layers.len(), documents.len());

    for (i, &layer) in layers.iter().enumerate() {
        let counter = count_layer(documents.iter().map(|(_, doc)| doc), layer)?;
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "{}", FrequencyTable { layer, counter: &counter, top_n })?;
    }
    Ok(())
}
