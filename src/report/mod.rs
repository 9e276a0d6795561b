//! Statistics and printouts over loaded documents
//!
//! - `constants`: default values shared with the loader and CLI
//! - `config`: YAML report configuration (`ReportConfig`)
//! - `summary`: sentence/token/annotation counts per document and corpus
//! - `frequency`: span frequency tables (`SpanCounter`)
//! - `inspect`: sentence, token and relation dumps of one document

pub mod config;
pub mod constants;
pub mod frequency;
pub mod inspect;
pub mod summary;

pub use config::ReportConfig;
pub use constants::*;
pub use frequency::{count_layer, span_key, FrequencyTable, SpanCounter};
pub use summary::{CorpusSummary, DocumentSummary};
