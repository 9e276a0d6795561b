pub mod dependency;

pub use dependency::{DependencyGraph, DeprelLabels, EdgePairIterator, CONLL_ROOT_HEAD};
