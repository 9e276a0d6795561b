use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::{ProgressBar, ProgressStyle};

use crate::data::document::Document;
use crate::report::constants::DEFAULT_FILE_SUFFIX;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads serialized documents, one per file, from gzipped or plain JSON
pub struct DocumentLoader {
    suffix: String,
    show_progress: bool,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_SUFFIX)
    }
}

impl DocumentLoader {
    /// Create a loader matching files that end with `suffix`
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            show_progress: false,
        }
    }

    /// Show a progress bar on stderr while loading a directory
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Deserialize one file. The file is closed before this returns.
    pub fn load_file<P: AsRef<Path>>(&self, file_path: P) -> Result<Document> {
        let path = file_path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open document file {}", path.display()))?;
        let mut reader = BufReader::new(file);

        // Sniff gzip by magic bytes rather than trusting the extension
        let mut magic = [0u8; 2];
        let read = read_prefix(&mut reader, &mut magic)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let prefix = &magic[..read];

        let parsed = if prefix == GZIP_MAGIC {
            self.parse_reader(GzDecoder::new(prefix.chain(reader)))
        } else {
            self.parse_reader(prefix.chain(reader))
        };
        let document =
            parsed.with_context(|| format!("Failed to load document from {}", path.display()))?;

        log::debug!(
            "Loaded document '{}' from {} ({} sentences)",
            document.id,
            path.display(),
            document.sentences.len()
        );
        Ok(document)
    }

    /// Deserialize one document from an already-decompressed reader
    pub fn parse_reader<R: Read>(&self, mut reader: R) -> Result<Document> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Failed to decompress or decode document data")?;
        let document = serde_json::from_str::<Document>(&content)
            .context("Data does not match the document model")?;
        Ok(document)
    }

    /// Parse a gzipped document held in memory
    pub fn parse_gzipped(&self, gzipped_data: &[u8]) -> Result<Document> {
        self.parse_reader(GzDecoder::new(gzipped_data))
    }

    /// All regular files in `dir` whose name ends with the loader's suffix,
    /// sorted by path
    pub fn find_document_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(anyhow!("Input path is not a directory: {}", dir.display()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {}", dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.len() > self.suffix.len() && name.ends_with(&self.suffix))
                .unwrap_or(false);
            if matches {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Source id of a document file: its file name without the suffix
    pub fn source_id(&self, path: &Path) -> Option<String> {
        let name = path.file_name()?.to_str()?;
        name.strip_suffix(self.suffix.as_str())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    /// Load every document file in `dir`, in file-name order.
    ///
    /// The first file that fails to load aborts the whole run.
    pub fn load_directory(&self, dir: &Path) -> Result<Vec<(String, Document)>> {
        let files = self.find_document_files(dir)?;
        log::info!("Found {} document files in {}", files.len(), dir.display());

        let progress = self.progress_bar(files.len());
        let mut documents = Vec::with_capacity(files.len());

        for path in &files {
            let source_id = self
                .source_id(path)
                .ok_or_else(|| anyhow!("Not a document file name: {}", path.display()))?;
            if let Some(pb) = &progress {
                pb.set_message(source_id.clone());
            }
            let document = self.load_file(path)?;
            documents.push((source_id, document));
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }
        Ok(documents)
    }

    fn progress_bar(&self, total_files: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new(total_files as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    }
}

/// Write a document as gzip-compressed JSON
pub fn save_document<P: AsRef<Path>>(file_path: P, document: &Document) -> Result<()> {
    let path = file_path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    serde_json::to_writer(&mut encoder, document)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Fill as much of `buf` as the reader allows; short files are not an error
fn read_prefix<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
