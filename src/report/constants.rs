//! Defaults shared by the loader, configuration and CLI

/// File name suffix of serialized documents: `<source-id>.conll.json.gz`
pub const DEFAULT_FILE_SUFFIX: &str = ".conll.json.gz";

pub const DEFAULT_TOP_N: usize = 20;
pub const DEFAULT_SHOW_SENTENCES: usize = 3;
pub const DEFAULT_SHOW_TOKENS: usize = 10;
