//! Per-document and corpus-wide counts

use std::collections::HashSet;
use std::fmt;

use crate::data::Document;

/// Counts derived from a single document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub sentences: usize,
    pub empty_sentences: usize,
    pub tokens: usize,
    pub unique_words: usize,
    pub unique_lemmas: usize,
    pub events: usize,
    pub claims: usize,
    pub attr_cues: usize,
    pub attr_contents: usize,
    pub attr_sources: usize,
    pub attr_relations: usize,
}

impl DocumentSummary {
    pub fn from_document(doc: &Document) -> Self {
        let words: HashSet<&str> = doc.words().collect();
        let lemmas: HashSet<&str> = doc.lemmas().collect();
        Self {
            sentences: doc.sentences.len(),
            empty_sentences: doc.empty_sentences(),
            tokens: doc.token_count(),
            unique_words: words.len(),
            unique_lemmas: lemmas.len(),
            events: doc.events.len(),
            claims: doc.claims.len(),
            attr_cues: doc.attr_cues.len(),
            attr_contents: doc.attr_contents.len(),
            attr_sources: doc.attr_sources.len(),
            attr_relations: doc.attr_relations.len(),
        }
    }

    fn rows(&self) -> [(&'static str, usize); 11] {
        [
            ("sentences", self.sentences),
            ("empty sentences", self.empty_sentences),
            ("tokens", self.tokens),
            ("unique words", self.unique_words),
            ("unique lemmas", self.unique_lemmas),
            ("events", self.events),
            ("claims", self.claims),
            ("attribution cues", self.attr_cues),
            ("attribution contents", self.attr_contents),
            ("attribution sources", self.attr_sources),
            ("attribution relations", self.attr_relations),
        ]
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, &self.rows())
    }
}

/// Totals accumulated over many documents.
///
/// Unique word and lemma counts are taken over the whole corpus, not summed
/// per document.
#[derive(Debug, Clone, Default)]
pub struct CorpusSummary {
    pub documents: usize,
    totals: DocumentSummary,
    words: HashSet<String>,
    lemmas: HashSet<String>,
}

impl CorpusSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, doc: &Document) -> DocumentSummary {
        let summary = DocumentSummary::from_document(doc);
        self.documents += 1;

        let t = &mut self.totals;
        t.sentences += summary.sentences;
        t.empty_sentences += summary.empty_sentences;
        t.tokens += summary.tokens;
        t.events += summary.events;
        t.claims += summary.claims;
        t.attr_cues += summary.attr_cues;
        t.attr_contents += summary.attr_contents;
        t.attr_sources += summary.attr_sources;
        t.attr_relations += summary.attr_relations;

        self.words.extend(doc.words().map(str::to_string));
        self.lemmas.extend(doc.lemmas().map(str::to_string));
        t.unique_words = self.words.len();
        t.unique_lemmas = self.lemmas.len();

        summary
    }

    pub fn totals(&self) -> &DocumentSummary {
        &self.totals
    }
}

impl<'a> FromIterator<&'a Document> for CorpusSummary {
    fn from_iter<I: IntoIterator<Item = &'a Document>>(iter: I) -> Self {
        let mut corpus = CorpusSummary::new();
        for doc in iter {
            corpus.add(doc);
        }
        corpus
    }
}

impl fmt::Display for CorpusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows = vec![("documents", self.documents)];
        rows.extend(self.totals.rows());
        write_rows(f, &rows)
    }
}

fn write_rows(f: &mut fmt::Formatter<'_>, rows: &[(&str, usize)]) -> fmt::Result {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        writeln!(f, "{:<width$}  {:>8}", label, value, width = width)?;
    }
    Ok(())
}
