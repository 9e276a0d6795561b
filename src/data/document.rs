use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::error::ModelError;
use crate::digraph::DependencyGraph;

/// Represents a complete annotated document: raw text, sentences and the
/// annotation layers produced for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub claims: Vec<Claim>,
    #[serde(default)]
    pub attr_cues: Vec<AttrCue>,
    #[serde(default)]
    pub attr_contents: Vec<AttrContent>,
    #[serde(default)]
    pub attr_sources: Vec<AttrSource>,
    #[serde(default)]
    pub attr_relations: Vec<AttrRelation>,
}

/// Represents a single sentence with its tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
    pub tokens: Vec<Token>,
}

/// A token with character offsets into the document text.
///
/// `id` is only unique within its sentence and is not required to be a
/// contiguous integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    pub word: String,
    pub lemma: String,
    pub pos: String,
    pub offset_start: usize,
    pub offset_end: usize,
    /// Id of the governing token; `None` for the sentence root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprel: Option<String>,
}

/// Points at a token by sentence index and per-sentence token id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub sentence: usize,
    pub token: String,
}

impl TokenRef {
    pub fn new(sentence: usize, token: impl Into<String>) -> Self {
        Self { sentence, token: token.into() }
    }
}

/// An annotated span: one or more tokens plus the text derived from them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub tokens: Vec<TokenRef>,
    pub text: String,
}

impl Span {
    pub fn new(tokens: Vec<TokenRef>, text: impl Into<String>) -> Self {
        Self { tokens, text: text.into() }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

pub type Event = Span;
pub type Claim = Span;
pub type AttrCue = Span;
pub type AttrContent = Span;
pub type AttrSource = Span;

/// Links one content span to its sources and cues.
///
/// All three refer to spans of the owning document by index into
/// `attr_contents`, `attr_sources` and `attr_cues` respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrRelation {
    pub content: usize,
    pub sources: Vec<usize>,
    pub cues: Vec<usize>,
}

/// An [`AttrRelation`] with its indices resolved against a document
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRelation<'a> {
    pub content: &'a AttrContent,
    pub sources: &'a [usize],
    pub cues: &'a [usize],
    doc: &'a Document,
}

impl<'a> ResolvedRelation<'a> {
    pub fn sources(&self) -> impl Iterator<Item = &'a AttrSource> + 'a {
        let (doc, sources) = (self.doc, self.sources);
        sources.iter().map(move |&i| &doc.attr_sources[i])
    }

    pub fn cues(&self) -> impl Iterator<Item = &'a AttrCue> + 'a {
        let (doc, cues) = (self.doc, self.cues);
        cues.iter().map(move |&i| &doc.attr_cues[i])
    }
}

/// The span layers of a document that can be counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationLayer {
    Events,
    Claims,
    AttrCues,
    AttrContents,
    AttrSources,
}

impl AnnotationLayer {
    pub const ALL: [AnnotationLayer; 5] = [
        AnnotationLayer::Events,
        AnnotationLayer::Claims,
        AnnotationLayer::AttrCues,
        AnnotationLayer::AttrContents,
        AnnotationLayer::AttrSources,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AnnotationLayer::Events => "events",
            AnnotationLayer::Claims => "claims",
            AnnotationLayer::AttrCues => "attr_cues",
            AnnotationLayer::AttrContents => "attr_contents",
            AnnotationLayer::AttrSources => "attr_sources",
        }
    }
}

impl fmt::Display for AnnotationLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnnotationLayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        AnnotationLayer::ALL
            .into_iter()
            .find(|layer| layer.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = AnnotationLayer::ALL.iter().map(|l| l.name()).collect();
                format!("unknown layer '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

impl Document {
    /// All tokens of the document, flattened across sentences in order
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }

    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.tokens.len()).sum()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tokens().map(|t| t.word.as_str())
    }

    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        self.tokens().map(|t| t.lemma.as_str())
    }

    /// Number of sentences without any token
    pub fn empty_sentences(&self) -> usize {
        self.sentences.iter().filter(|s| s.tokens.is_empty()).count()
    }

    pub fn get_sentence(&self, sentence_idx: usize) -> Result<&Sentence, ModelError> {
        self.sentences
            .get(sentence_idx)
            .ok_or(ModelError::SentenceOutOfBounds(sentence_idx))
    }

    pub fn layer(&self, layer: AnnotationLayer) -> &[Span] {
        match layer {
            AnnotationLayer::Events => &self.events,
            AnnotationLayer::Claims => &self.claims,
            AnnotationLayer::AttrCues => &self.attr_cues,
            AnnotationLayer::AttrContents => &self.attr_contents,
            AnnotationLayer::AttrSources => &self.attr_sources,
        }
    }

    pub fn resolve_token(&self, token_ref: &TokenRef) -> Result<&Token, ModelError> {
        self.get_sentence(token_ref.sentence)?
            .token(&token_ref.token)
            .ok_or_else(|| ModelError::UnknownToken {
                sentence: token_ref.sentence,
                token: token_ref.token.clone(),
            })
    }

    /// Resolve every token of a span, in span order
    pub fn resolve_span(&self, span: &Span) -> Result<Vec<&Token>, ModelError> {
        if span.is_empty() {
            return Err(ModelError::EmptySpan);
        }
        span.tokens.iter().map(|r| self.resolve_token(r)).collect()
    }

    pub fn resolve_relation<'a>(
        &'a self,
        relation: &'a AttrRelation,
    ) -> Result<ResolvedRelation<'a>, ModelError> {
        let content = self
            .attr_contents
            .get(relation.content)
            .ok_or(ModelError::MissingSpan { layer: "content", index: relation.content })?;
        if relation.sources.is_empty() {
            return Err(ModelError::EmptyRelation { layer: "source" });
        }
        if relation.cues.is_empty() {
            return Err(ModelError::EmptyRelation { layer: "cue" });
        }
        if let Some(&index) = relation.sources.iter().find(|&&i| i >= self.attr_sources.len()) {
            return Err(ModelError::MissingSpan { layer: "source", index });
        }
        if let Some(&index) = relation.cues.iter().find(|&&i| i >= self.attr_cues.len()) {
            return Err(ModelError::MissingSpan { layer: "cue", index });
        }
        Ok(ResolvedRelation {
            content,
            sources: &relation.sources,
            cues: &relation.cues,
            doc: self,
        })
    }

    /// Character-boundary table of the document text, for repeated slicing
    pub fn text_index(&self) -> TextIndex<'_> {
        TextIndex::new(&self.text)
    }

    /// Substring of the document text between two character offsets
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        self.text_index().slice(start, end)
    }

    /// Text covered by a token's offsets
    pub fn token_text(&self, token: &Token) -> Option<&str> {
        self.slice(token.offset_start, token.offset_end)
    }

    /// Tokens whose offsets do not reproduce their surface form
    pub fn offset_mismatches(&self) -> Vec<(usize, &Token)> {
        let index = self.text_index();
        self.sentences
            .iter()
            .flat_map(|s| s.tokens.iter().map(move |t| (s.index, t)))
            .filter(|(_, t)| index.token_text(t) != Some(t.word.as_str()))
            .collect()
    }
}

/// Byte position of every character boundary of a text, built once so that
/// slicing by character offsets is a lookup.
#[derive(Debug, Clone)]
pub struct TextIndex<'a> {
    text: &'a str,
    boundaries: Vec<usize>,
}

impl<'a> TextIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, boundaries }
    }

    /// Length of the text in characters
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn slice(&self, start: usize, end: usize) -> Option<&'a str> {
        if start > end {
            return None;
        }
        let begin = *self.boundaries.get(start)?;
        let finish = *self.boundaries.get(end)?;
        Some(&self.text[begin..finish])
    }

    pub fn token_text(&self, token: &Token) -> Option<&'a str> {
        self.slice(token.offset_start, token.offset_end)
    }
}

impl Sentence {
    /// Look up a token by its identifier
    pub fn token(&self, id: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// Position of a token within the sentence
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tokens.iter().position(|t| t.id == id)
    }

    pub fn dependency_graph(&self) -> Result<DependencyGraph, ModelError> {
        DependencyGraph::from_sentence(self)
    }

    /// The maximal phrase rooted at `head_id`: the head and all of its
    /// transitive dependents, in sentence order.
    pub fn phrase(&self, head_id: &str) -> Result<Vec<&Token>, ModelError> {
        let head = self.position(head_id).ok_or_else(|| ModelError::UnknownToken {
            sentence: self.index,
            token: head_id.to_string(),
        })?;
        let graph = self.dependency_graph()?;
        Ok(graph.descendants(head).into_iter().map(|i| &self.tokens[i]).collect())
    }

    /// Surface text of the phrase rooted at `head_id`
    pub fn phrase_text(&self, head_id: &str) -> Result<String, ModelError> {
        let words: Vec<&str> = self.phrase(head_id)?.iter().map(|t| t.word.as_str()).collect();
        Ok(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_document;
    use std::collections::HashSet;

    #[test]
    fn test_flattened_tokens() {
        let doc = sample_document();
        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.token_count(), 11);
        assert_eq!(doc.tokens().count(), doc.token_count());
        assert!(doc.token_count() >= doc.sentences.len());

        let words: Vec<&str> = doc.words().take(3).collect();
        assert_eq!(words, vec!["Officials", "said", "the"]);
    }

    #[test]
    fn test_unique_words_bounded_by_tokens() {
        let doc = sample_document();
        let words: HashSet<&str> = doc.words().collect();
        let lemmas: HashSet<&str> = doc.lemmas().collect();
        assert!(words.len() <= doc.token_count());
        assert!(lemmas.len() <= doc.token_count());
        // both sentences end in "."
        assert_eq!(words.len(), doc.token_count() - 1);
    }

    #[test]
    fn test_token_lookup_by_id() {
        let doc = sample_document();
        let second = &doc.sentences[1];
        assert_eq!(second.token("12").map(|t| t.word.as_str()), Some("away"));
        assert!(second.token("2").is_none());
        assert_eq!(second.position("10"), Some(0));
    }

    #[test]
    fn test_offsets_round_trip() {
        let doc = sample_document();
        for token in doc.tokens() {
            assert_eq!(doc.token_text(token), Some(token.word.as_str()));
        }
        assert!(doc.offset_mismatches().is_empty());
    }

    #[test]
    fn test_sentence_text_is_substring() {
        let doc = sample_document();
        for sentence in &doc.sentences {
            assert!(doc.text.contains(&sentence.text));
        }
    }

    #[test]
    fn test_slice_uses_character_offsets() {
        let mut doc = sample_document();
        doc.text = "Zoë said so".to_string();
        assert_eq!(doc.slice(0, 3), Some("Zoë"));
        assert_eq!(doc.slice(4, 8), Some("said"));
        assert_eq!(doc.slice(9, 11), Some("so"));
        assert_eq!(doc.slice(11, 11), Some(""));
        assert_eq!(doc.slice(9, 12), None);
        assert_eq!(doc.slice(5, 4), None);
    }

    #[test]
    fn test_text_index_reused_across_slices() {
        let index = TextIndex::new("Zoë said so");
        assert_eq!(index.char_len(), 11);
        assert_eq!(index.slice(0, 3), Some("Zoë"));
        assert_eq!(index.slice(4, 8), Some("said"));
        assert_eq!(index.slice(11, 11), Some(""));
        assert_eq!(index.slice(10, 12), None);

        let doc = sample_document();
        let index = doc.text_index();
        for token in doc.tokens() {
            assert_eq!(index.token_text(token), doc.token_text(token));
        }
    }

    #[test]
    fn test_phrase_from_head() {
        let doc = sample_document();
        let first = &doc.sentences[0];
        assert_eq!(first.phrase_text("4").unwrap(), "the plan");
        assert_eq!(first.phrase_text("6").unwrap(), "the plan will run");
        assert_eq!(first.phrase_text("2").unwrap(), "Officials said the plan will run .");
        assert_eq!(doc.sentences[1].phrase_text("11").unwrap(), "Critics walk away .");
    }

    #[test]
    fn test_phrase_unknown_head() {
        let doc = sample_document();
        let err = doc.sentences[0].phrase("99").unwrap_err();
        assert_eq!(err, ModelError::UnknownToken { sentence: 0, token: "99".to_string() });
    }

    #[test]
    fn test_resolve_span() {
        let doc = sample_document();
        let tokens = doc.resolve_span(&doc.claims[0]).unwrap();
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();
        assert_eq!(words.join(" "), doc.claims[0].text);

        let dangling = Span::new(vec![TokenRef::new(1, "99")], "?");
        assert!(matches!(doc.resolve_span(&dangling), Err(ModelError::UnknownToken { .. })));

        let out_of_bounds = Span::new(vec![TokenRef::new(5, "1")], "?");
        assert_eq!(doc.resolve_span(&out_of_bounds), Err(ModelError::SentenceOutOfBounds(5)));

        assert_eq!(doc.resolve_span(&Span::new(vec![], "")), Err(ModelError::EmptySpan));
    }

    #[test]
    fn test_relation_shape() {
        let doc = sample_document();
        let relation = &doc.attr_relations[0];
        let resolved = doc.resolve_relation(relation).unwrap();

        assert_eq!(resolved.content.text, "the plan will run");
        assert!(!resolved.sources.is_empty());
        assert!(!resolved.cues.is_empty());
        let sources: Vec<&str> = resolved.sources().map(|s| s.text.as_str()).collect();
        let cues: Vec<&str> = resolved.cues().map(|c| c.text.as_str()).collect();
        assert_eq!(sources, vec!["Officials"]);
        assert_eq!(cues, vec!["said"]);
    }

    #[test]
    fn test_relation_without_sources() {
        let doc = sample_document();
        let relation = AttrRelation { content: 0, sources: vec![], cues: vec![0] };
        let err = doc.resolve_relation(&relation).unwrap_err();
        assert_eq!(err, ModelError::EmptyRelation { layer: "source" });
    }

    #[test]
    fn test_relation_without_cues() {
        let doc = sample_document();
        let relation = AttrRelation { content: 0, sources: vec![0], cues: vec![] };
        let err = doc.resolve_relation(&relation).unwrap_err();
        assert_eq!(err, ModelError::EmptyRelation { layer: "cue" });
    }

    #[test]
    fn test_relation_with_missing_source() {
        let doc = sample_document();
        let relation = AttrRelation { content: 0, sources: vec![0, 4], cues: vec![0] };
        let err = doc.resolve_relation(&relation).unwrap_err();
        assert_eq!(err, ModelError::MissingSpan { layer: "source", index: 4 });
    }

    #[test]
    fn test_layer_parsing() {
        assert_eq!("events".parse::<AnnotationLayer>().unwrap(), AnnotationLayer::Events);
        assert_eq!("attr-cues".parse::<AnnotationLayer>().unwrap(), AnnotationLayer::AttrCues);
        assert_eq!(" Claims ".parse::<AnnotationLayer>().unwrap(), AnnotationLayer::Claims);
        assert!("relations".parse::<AnnotationLayer>().is_err());
        assert_eq!(AnnotationLayer::AttrSources.to_string(), "attr_sources");
    }

    #[test]
    fn test_missing_layers_default_to_empty() {
        let json = r#"{
            "id": "bare",
            "text": "Hi",
            "sentences": [
                {"index": 0, "text": "Hi", "tokens": [
                    {"id": "1", "word": "Hi", "lemma": "hi", "pos": "UH",
                     "offset_start": 0, "offset_end": 2}
                ]}
            ]
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(doc.events.is_empty());
        assert!(doc.attr_relations.is_empty());
        assert_eq!(doc.sentences[0].tokens[0].head, None);
    }
}
