use crate::{Automaton, Node, NodeId, Token};

/// A stored pattern and its payload, as yielded by
/// [`Automaton::predictive_search`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternEntry<'a, T, V> {
    /// The full pattern.
    pub pattern: Vec<T>,
    /// The payload stored for the pattern.
    pub value: &'a V,
}

impl<T: Token, V> Automaton<T, V> {
    /// Walks the trie along `prefix` without creating nodes.
    ///
    /// Returns the node reached after consuming every token, or `None` if some
    /// edge is missing. The empty prefix resolves to the root.
    pub fn find_node(&self, prefix: &[T]) -> Option<NodeId> {
        let mut node = NodeId::ROOT;
        for token in prefix {
            node = self.nodes[node.index()].child(token)?;
        }
        Some(node)
    }

    /// Returns true if `pattern` was inserted.
    pub fn has_pattern(&self, pattern: &[T]) -> bool {
        self.get_value(pattern).is_some()
    }

    /// Returns true if `prefix` is a prefix of some inserted pattern
    /// (including the pattern itself).
    pub fn has_prefix(&self, prefix: &[T]) -> bool {
        self.find_node(prefix).is_some()
    }

    /// Returns the payload stored for `pattern`.
    pub fn get_value(&self, pattern: &[T]) -> Option<&V> {
        let id = self.find_node(pattern)?;
        self.nodes[id.index()].value()
    }

    /// Returns every stored pattern starting with `prefix`, with its payload,
    /// in token order.
    pub fn predictive_search<'a>(&'a self, prefix: &[T]) -> PredictiveIter<'a, T, V> {
        let mut stack = Vec::new();
        if let Some(node) = self.find_node(prefix) {
            stack.push((node, prefix.len(), None));
        }
        PredictiveIter {
            nodes: &self.nodes,
            stack,
            key_buf: prefix.to_vec(),
        }
    }

    /// Returns every stored pattern with its payload, in token order.
    pub fn iter(&self) -> PredictiveIter<'_, T, V> {
        self.predictive_search(&[])
    }
}

/// Depth-first iterator over stored patterns below a trie node.
pub struct PredictiveIter<'a, T, V> {
    nodes: &'a [Node<T, V>],
    /// DFS stack: (node, parent depth, token leading to it).
    /// `None` marks the start node, whose path is already in `key_buf`.
    stack: Vec<(NodeId, usize, Option<&'a T>)>,
    /// Path of the node being visited; truncated and regrown as the DFS moves.
    key_buf: Vec<T>,
}

impl<'a, T: Token, V> Iterator for PredictiveIter<'a, T, V> {
    type Item = PatternEntry<'a, T, V>;

    fn next(&mut self) -> Option<PatternEntry<'a, T, V>> {
        while let Some((id, parent_depth, token)) = self.stack.pop() {
            self.key_buf.truncate(parent_depth);
            if let Some(token) = token {
                self.key_buf.push(token.clone());
            }
            let depth = self.key_buf.len();

            let nodes = self.nodes;
            let node = &nodes[id.index()];
            // Reverse so the smallest token is popped first.
            for (token, child) in node.transitions().rev() {
                self.stack.push((child, depth, Some(token)));
            }

            if let Some(value) = node.value() {
                return Some(PatternEntry {
                    pattern: self.key_buf.clone(),
                    value,
                });
            }
        }
        None
    }
}
