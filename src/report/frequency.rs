//! Frequency tables over annotated spans

use std::collections::HashMap;
use std::fmt;

use crate::data::{AnnotationLayer, Document, ModelError, Span};

/// Key a span is counted under.
///
/// Single-token spans use the lower-cased lemma, longer spans the
/// lower-cased surface words joined by single spaces.
pub fn span_key(doc: &Document, span: &Span) -> Result<String, ModelError> {
    let tokens = doc.resolve_span(span)?;
    match tokens.as_slice() {
        [token] => Ok(token.lemma.to_lowercase()),
        _ => {
            let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
            Ok(words.join(" ").to_lowercase())
        }
    }
}

/// Multiset of string keys that remembers first-insertion order
#[derive(Debug, Clone, Default)]
pub struct SpanCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl SpanCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn count(&self, key: &str) -> usize {
        self.index.get(key).map(|&slot| self.entries[slot].1).unwrap_or(0)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// The `n` most frequent keys, highest count first. Equal counts keep
    /// the order in which keys were first seen.
    pub fn most_common(&self, n: usize) -> Vec<(String, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Count every span of one layer of a document
    pub fn add_layer(&mut self, doc: &Document, layer: AnnotationLayer) -> Result<(), ModelError> {
        for span in doc.layer(layer) {
            self.add(span_key(doc, span)?);
        }
        Ok(())
    }
}

impl<K: Into<String>> Extend<K> for SpanCounter {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K: Into<String>> FromIterator<K> for SpanCounter {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = SpanCounter::new();
        counter.extend(iter);
        counter
    }
}

/// Aggregate one layer over many documents
pub fn count_layer<'a, I>(docs: I, layer: AnnotationLayer) -> Result<SpanCounter, ModelError>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut counter = SpanCounter::new();
    for doc in docs {
        counter.add_layer(doc, layer)?;
    }
    Ok(counter)
}

/// A rendered frequency table for one layer
pub struct FrequencyTable<'a> {
    pub layer: AnnotationLayer,
    pub counter: &'a SpanCounter,
    pub top_n: usize,
}

impl fmt::Display for FrequencyTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} spans, {} distinct)",
            self.layer,
            self.counter.total(),
            self.counter.len()
        )?;
        for (key, count) in self.counter.most_common(self.top_n) {
            writeln!(f, "  {:>6}  {}", count, key)?;
        }
        Ok(())
    }
}
