use std::collections::VecDeque;

use crate::{Automaton, Node, NodeId, State, Token};

/// Advances the automaton from `state` on `token`.
///
/// Follows failure links until some node has an edge on `token`. The root
/// absorbs every token it has no edge for, so the walk always ends.
/// `failure` must be valid for every node shallower than `state`.
#[inline]
pub(crate) fn next_state<T: Token, V>(
    nodes: &[Node<T, V>],
    failure: &[NodeId],
    mut state: NodeId,
    token: &T,
) -> NodeId {
    loop {
        if let Some(next) = nodes[state.index()].child(token) {
            return next;
        }
        if state.is_root() {
            return NodeId::ROOT;
        }
        state = failure[state.index()];
    }
}

/// Appends the outputs of `target` to those of `child`.
///
/// `target` may sit on either side of `child` in the table: a failure target
/// is shallower but can be created later.
fn inherit_outputs<T: Token, V>(nodes: &mut [Node<T, V>], child: NodeId, target: NodeId) {
    let (c, t) = (child.index(), target.index());
    debug_assert_ne!(c, t);
    if t < c {
        let (head, tail) = nodes.split_at_mut(c);
        tail[0].extend_outputs(head[t].outputs());
    } else {
        let (head, tail) = nodes.split_at_mut(t);
        head[c].extend_outputs(tail[0].outputs());
    }
}

impl<T: Token, V> Automaton<T, V> {
    /// Rebuilds failure links and output sets from the current trie.
    ///
    /// Scanning through [`get_matches`](Self::get_matches) or
    /// [`searcher`](Self::searcher) calls this when the automaton is stale;
    /// call it directly to compile ahead of concurrent use through
    /// [`try_searcher`](Self::try_searcher). Compiling an up-to-date automaton
    /// again yields the same tables.
    pub fn update_automaton(&mut self) {
        let mut failure = vec![NodeId::ROOT; self.nodes.len()];
        for node in &mut self.nodes {
            node.reset_outputs();
        }

        // Depth-1 nodes fail to the root, which the table already holds.
        let mut queue: VecDeque<NodeId> = self.nodes[NodeId::ROOT.index()]
            .transitions()
            .map(|(_, child)| child)
            .collect();
        let mut resolved: Vec<(NodeId, NodeId)> = Vec::new();

        while let Some(parent) = queue.pop_front() {
            let node = &self.nodes[parent.index()];
            let parent_failure = failure[parent.index()];
            resolved.clear();
            resolved.extend(node.transitions().map(|(token, child)| {
                let target = next_state(&self.nodes, &failure, parent_failure, token);
                (child, target)
            }));

            for &(child, target) in &resolved {
                debug_assert!(
                    self.nodes[target.index()].depth() < self.nodes[child.index()].depth(),
                    "failure target must be shallower"
                );
                tracing::trace!(node = %child, failure = %target, "resolved failure link");
                failure[child.index()] = target;
                inherit_outputs(&mut self.nodes, child, target);
                queue.push_back(child);
            }
        }

        self.failure = failure;
        self.state = State::Compiled;
        tracing::debug!(
            nodes = self.nodes.len(),
            patterns = self.num_patterns,
            "compiled automaton"
        );
    }

    /// Returns the failure target of `id`.
    ///
    /// `None` if the automaton is stale or `id` is out of range.
    pub fn failure(&self, id: NodeId) -> Option<NodeId> {
        match self.state {
            State::Compiled => self.failure.get(id.index()).copied(),
            State::Stale => None,
        }
    }
}
