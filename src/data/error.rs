//! Errors raised while resolving references inside a deserialized document.

use thiserror::Error;

/// A reference inside a [`Document`](crate::data::Document) that does not
/// point at anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Sentence index out of bounds: {0}")]
    SentenceOutOfBounds(usize),

    #[error("Token '{token}' not found in sentence {sentence}")]
    UnknownToken { sentence: usize, token: String },

    #[error("Token '{token}' in sentence {sentence} has unknown head '{head}'")]
    UnknownHead {
        sentence: usize,
        token: String,
        head: String,
    },

    #[error("Relation refers to missing {layer} span {index}")]
    MissingSpan { layer: &'static str, index: usize },

    #[error("Relation has no {layer} spans")]
    EmptyRelation { layer: &'static str },

    #[error("Annotation span has no tokens")]
    EmptySpan,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::UnknownToken { sentence: 3, token: "t7".to_string() };
        assert!(err.to_string().contains("t7"));
        assert!(err.to_string().contains('3'));

        let err = ModelError::MissingSpan { layer: "source", index: 12 };
        assert_eq!(err.to_string(), "Relation refers to missing source span 12");

        let err = ModelError::EmptyRelation { layer: "cue" };
        assert_eq!(err.to_string(), "Relation has no cue spans");
    }
}
