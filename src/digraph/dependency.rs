use std::collections::HashMap;

use crate::data::document::Sentence;
use crate::data::error::ModelError;

/// Head id used by CoNLL producers to mark the sentence root
pub const CONLL_ROOT_HEAD: &str = "0";

/// Dependency relation labels seen in one sentence, numbered in order of
/// first use. A sentence carries a few dozen labels at most, so lookup is a
/// scan.
#[derive(Debug, Clone, Default)]
pub struct DeprelLabels {
    names: Vec<String>,
}

impl DeprelLabels {
    pub fn intern(&mut self, deprel: &str) -> usize {
        match self.names.iter().position(|n| n == deprel) {
            Some(id) => id,
            None => {
                self.names.push(deprel.to_string());
                self.names.len() - 1
            }
        }
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }
}

/// Dependency tree of one sentence.
///
/// Nodes are token positions within the sentence. Edges run from head to
/// dependent and are stored per node as flattened `(node, label_id)` pairs.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    incoming: Vec<Vec<usize>>,
    outgoing: Vec<Vec<usize>>,
    roots: Vec<usize>,
    labels: DeprelLabels,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from the `head`/`deprel` columns of a sentence.
    ///
    /// Tokens without a head, or whose head is the CoNLL root marker and no
    /// token carries that id, become roots.
    pub fn from_sentence(sentence: &Sentence) -> Result<Self, ModelError> {
        let mut graph = Self::new();
        let positions: HashMap<&str, usize> = sentence
            .tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        let mut roots = Vec::new();
        for (position, token) in sentence.tokens.iter().enumerate() {
            graph.add_node(position);
            let Some(head) = token.head.as_deref() else {
                roots.push(position);
                continue;
            };
            match positions.get(head) {
                Some(&head_position) => {
                    let label = token.deprel.as_deref().unwrap_or("dep");
                    graph.add_edge(head_position, position, label);
                }
                None if head == CONLL_ROOT_HEAD => roots.push(position),
                None => {
                    return Err(ModelError::UnknownHead {
                        sentence: sentence.index,
                        token: token.id.clone(),
                        head: head.to_string(),
                    })
                }
            }
        }
        graph.roots = roots;
        Ok(graph)
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node_id: usize) {
        while self.incoming.len() <= node_id {
            self.incoming.push(Vec::new());
        }
        while self.outgoing.len() <= node_id {
            self.outgoing.push(Vec::new());
        }
    }

    /// Add a head -> dependent edge
    pub fn add_edge(&mut self, from: usize, to: usize, label: &str) {
        self.add_node(from);
        self.add_node(to);

        let label_id = self.labels.intern(label);

        // [target_node, label_id, target_node, label_id, ...]
        self.outgoing[from].push(to);
        self.outgoing[from].push(label_id);

        // [source_node, label_id, source_node, label_id, ...]
        self.incoming[to].push(from);
        self.incoming[to].push(label_id);
    }

    /// Dependents of a node as `(node, label_id)` pairs
    pub fn outgoing(&self, node_id: usize) -> Option<EdgePairIterator<'_>> {
        self.outgoing.get(node_id).map(|v| EdgePairIterator::new(v))
    }

    /// Heads of a node as `(node, label_id)` pairs
    pub fn incoming(&self, node_id: usize) -> Option<EdgePairIterator<'_>> {
        self.incoming.get(node_id).map(|v| EdgePairIterator::new(v))
    }

    pub fn has_incoming(&self, node_id: usize) -> bool {
        node_id < self.incoming.len() && !self.incoming[node_id].is_empty()
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn label(&self, label_id: usize) -> Option<&str> {
        self.labels.name(label_id)
    }

    pub fn node_count(&self) -> usize {
        self.incoming.len().max(self.outgoing.len())
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|edges| edges.len() / 2).sum()
    }

    /// The node and everything reachable from it along outgoing edges,
    /// sorted by position. Malformed input with cycles terminates.
    pub fn descendants(&self, node_id: usize) -> Vec<usize> {
        let mut visited = vec![false; self.node_count()];
        let mut stack = vec![node_id];
        let mut found = Vec::new();

        while let Some(node) = stack.pop() {
            match visited.get_mut(node) {
                Some(seen) if !*seen => *seen = true,
                _ => continue,
            }
            found.push(node);
            if let Some(edges) = self.outgoing(node) {
                stack.extend(edges.map(|(target, _)| target));
            }
        }

        found.sort_unstable();
        found
    }
}

/// Iterator over edges stored as flattened (node, label_id) pairs.
pub struct EdgePairIterator<'a> {
    edges: &'a [usize],
    pos: usize,
}

impl<'a> EdgePairIterator<'a> {
    fn new(edges: &'a [usize]) -> Self {
        Self { edges, pos: 0 }
    }
}

impl<'a> Iterator for EdgePairIterator<'a> {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos + 1 < self.edges.len() {
            let node = self.edges[self.pos];
            let label_id = self.edges[self.pos + 1];
            self.pos += 2;
            Some((node, label_id))
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.edges.len() - self.pos) / 2;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for EdgePairIterator<'a> {}
