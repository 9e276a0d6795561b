//! Sample documents shared by the unit tests.

use crate::data::document::{AttrRelation, Document, Sentence, Span, Token, TokenRef};

/// (id, word, lemma, pos, head, deprel)
type Row<'a> = (&'a str, &'a str, &'a str, &'a str, Option<&'a str>, &'a str);

/// Build a sentence, assigning offsets by locating each word in `text`
/// after `cursor`. Fixture text is ASCII so byte and character offsets agree.
pub(crate) fn build_sentence(text: &str, index: usize, cursor: &mut usize, rows: &[Row]) -> Sentence {
    let mut tokens = Vec::new();
    for &(id, word, lemma, pos, head, deprel) in rows {
        let start = *cursor + text[*cursor..].find(word).expect("fixture word missing from text");
        let end = start + word.len();
        *cursor = end;
        tokens.push(Token {
            id: id.to_string(),
            word: word.to_string(),
            lemma: lemma.to_string(),
            pos: pos.to_string(),
            offset_start: start,
            offset_end: end,
            head: head.map(str::to_string),
            deprel: Some(deprel.to_string()),
        });
    }
    let sentence_text = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => text[first.offset_start..last.offset_end].to_string(),
        _ => String::new(),
    };
    Sentence { index, text: sentence_text, tokens }
}

pub(crate) fn span(sentence: usize, ids: &[&str], text: &str) -> Span {
    Span::new(ids.iter().map(|id| TokenRef::new(sentence, *id)).collect(), text)
}

/// "Officials said the plan will run. Critics walk away."
///
/// The second sentence uses non-contiguous token ids (10..13).
pub(crate) fn sample_document() -> Document {
    let text = "Officials said the plan will run. Critics walk away.";
    let mut cursor = 0;
    let first = build_sentence(
        text,
        0,
        &mut cursor,
        &[
            ("1", "Officials", "official", "NNS", Some("2"), "nsubj"),
            ("2", "said", "say", "VBD", None, "root"),
            ("3", "the", "the", "DT", Some("4"), "det"),
            ("4", "plan", "plan", "NN", Some("6"), "nsubj"),
            ("5", "will", "will", "MD", Some("6"), "aux"),
            ("6", "run", "run", "VB", Some("2"), "ccomp"),
            ("7", ".", ".", ".", Some("2"), "punct"),
        ],
    );
    let second = build_sentence(
        text,
        1,
        &mut cursor,
        &[
            ("10", "Critics", "critic", "NNS", Some("11"), "nsubj"),
            ("11", "walk", "walk", "VBP", None, "root"),
            ("12", "away", "away", "RB", Some("11"), "advmod"),
            ("13", ".", ".", ".", Some("11"), "punct"),
        ],
    );

    Document {
        id: "sample".to_string(),
        text: text.to_string(),
        sentences: vec![first, second],
        events: vec![
            span(0, &["6"], "run"),
            span(1, &["11", "12"], "walk away"),
        ],
        claims: vec![span(0, &["3", "4", "5", "6"], "the plan will run")],
        attr_cues: vec![span(0, &["2"], "said")],
        attr_contents: vec![span(0, &["3", "4", "5", "6"], "the plan will run")],
        attr_sources: vec![span(0, &["1"], "Officials")],
        attr_relations: vec![AttrRelation { content: 0, sources: vec![0], cues: vec![0] }],
    }
}
