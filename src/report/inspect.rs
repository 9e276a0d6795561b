//! Human-readable dumps of a single document

use std::io::{self, Write};

use crate::data::{Document, Span};

/// Print the first `limit` sentences with their index and text
pub fn write_sentences<W: Write>(out: &mut W, doc: &Document, limit: usize) -> io::Result<()> {
    for sentence in doc.sentences.iter().take(limit) {
        writeln!(out, "[{}] {}", sentence.index, sentence.text)?;
    }
    if doc.sentences.len() > limit {
        writeln!(out, "... {} more sentences", doc.sentences.len() - limit)?;
    }
    Ok(())
}

/// Print the first `limit` tokens of a sentence together with the document
/// text their offsets point at
pub fn write_tokens<W: Write>(
    out: &mut W,
    doc: &Document,
    sentence_idx: usize,
    limit: usize,
) -> io::Result<()> {
    let Some(sentence) = doc.sentences.get(sentence_idx) else {
        return writeln!(out, "no sentence {}", sentence_idx);
    };
    writeln!(
        out,
        "{:<6} {:<16} {:<16} {:<6} {:>12}  text",
        "id", "word", "lemma", "pos", "offsets"
    )?;
    let index = doc.text_index();
    for token in sentence.tokens.iter().take(limit) {
        let offsets = format!("{}..{}", token.offset_start, token.offset_end);
        writeln!(
            out,
            "{:<6} {:<16} {:<16} {:<6} {:>12}  {:?}",
            token.id,
            token.word,
            token.lemma,
            token.pos,
            offsets,
            index.token_text(token).unwrap_or("")
        )?;
    }
    Ok(())
}

/// Print every attribution relation as `content <- sources [cues]`.
///
/// Relations with dangling indices are reported inline.
pub fn write_relations<W: Write>(out: &mut W, doc: &Document) -> io::Result<()> {
    for (i, relation) in doc.attr_relations.iter().enumerate() {
        match doc.resolve_relation(relation) {
            Ok(resolved) => {
                let sources = join_texts(resolved.sources());
                let cues = join_texts(resolved.cues());
                writeln!(out, "{:>3}. \"{}\" <- {} [{}]", i, resolved.content.text, sources, cues)?;
            }
            Err(e) => writeln!(out, "{:>3}. <unresolved: {}>", i, e)?,
        }
    }
    Ok(())
}

/// Log tokens whose offsets do not reproduce their surface form.
///
/// Producers may normalize words (quotes, brackets), so this only warns.
pub fn warn_offset_mismatches(doc: &Document) -> usize {
    let mismatches = doc.offset_mismatches();
    for (sentence, token) in &mismatches {
        log::warn!(
            "Document '{}' sentence {}: token '{}' word {:?} but text {:?}",
            doc.id,
            sentence,
            token.id,
            token.word,
            doc.token_text(token).unwrap_or("<out of range>")
        );
    }
    mismatches.len()
}

fn join_texts<'a>(spans: impl Iterator<Item = &'a Span>) -> String {
    spans.map(|s| format!("\"{}\"", s.text)).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_document;
    use crate::data::AttrRelation;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_sentences() {
        let doc = sample_document();
        let all = render(|out| write_sentences(out, &doc, 5));
        assert_eq!(all, "[0] Officials said the plan will run.\n[1] Critics walk away.\n");

        let one = render(|out| write_sentences(out, &doc, 1));
        assert!(one.ends_with("... 1 more sentences\n"));
    }

    #[test]
    fn test_write_tokens() {
        let doc = sample_document();
        let table = render(|out| write_tokens(out, &doc, 1, 2));
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("10"));
        assert!(lines[1].contains("34..41"));
        assert!(lines[1].ends_with("\"Critics\""));

        let missing = render(|out| write_tokens(out, &doc, 9, 2));
        assert_eq!(missing, "no sentence 9\n");
    }

    #[test]
    fn test_write_relations() {
        let mut doc = sample_document();
        doc.attr_relations.push(AttrRelation { content: 3, sources: vec![0], cues: vec![0] });
        let rendered = render(|out| write_relations(out, &doc));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "  0. \"the plan will run\" <- \"Officials\" [\"said\"]");
        assert!(lines[1].contains("unresolved"));
    }

    #[test]
    fn test_offset_mismatches_are_counted() {
        let mut doc = sample_document();
        assert_eq!(warn_offset_mismatches(&doc), 0);
        doc.sentences[0].tokens[0].word = "officials".to_string();
        assert_eq!(warn_offset_mismatches(&doc), 1);
    }
}
