pub mod data;
pub mod digraph;
pub mod report;

pub use data::{
    save_document, AnnotationLayer, AttrRelation, Document, DocumentLoader, ModelError, Sentence,
    Span, Token, TokenRef,
};
pub use digraph::DependencyGraph;
pub use report::{CorpusSummary, DocumentSummary, ReportConfig, SpanCounter};
