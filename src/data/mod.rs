pub mod document;
pub mod error;
pub mod loader;

#[cfg(test)]
pub(crate) mod fixtures;

pub use document::{
    AnnotationLayer, AttrContent, AttrCue, AttrRelation, AttrSource, Claim, Document, Event,
    ResolvedRelation, Sentence, Span, TextIndex, Token, TokenRef,
};
pub use error::ModelError;
pub use loader::{save_document, DocumentLoader};
