use crate::{Automaton, AutomatonError, Node, NodeId, Result, State, Token};

impl<T: Token, V> Automaton<T, V> {
    /// Builds an automaton from `(pattern, value)` pairs.
    ///
    /// Later duplicates overwrite earlier values.
    ///
    /// # Errors
    /// Fails on the first empty pattern or empty token; see [`add`](Self::add).
    pub fn from_patterns<I, P>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, V)>,
        P: AsRef<[T]>,
    {
        let mut ac = Self::new();
        ac.try_extend(patterns)?;
        Ok(ac)
    }

    /// Inserts every `(pattern, value)` pair, stopping at the first error.
    ///
    /// Pairs inserted before the failing one stay in the automaton.
    pub fn try_extend<I, P>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = (P, V)>,
        P: AsRef<[T]>,
    {
        for (pattern, value) in patterns {
            self.add(pattern.as_ref(), value)?;
        }
        Ok(())
    }

    /// Inserts `pattern` with its payload, returning the payload it replaced.
    ///
    /// Missing trie nodes are created along the way. The automaton becomes
    /// stale and is recompiled by the next scan.
    ///
    /// # Errors
    /// - [`AutomatonError::EmptyPattern`] if `pattern` has no tokens.
    /// - [`AutomatonError::EmptyToken`] if some token reports itself empty.
    ///
    /// The automaton is left untouched on error.
    pub fn add(&mut self, pattern: &[T], value: V) -> Result<Option<V>> {
        if pattern.is_empty() {
            return Err(AutomatonError::EmptyPattern);
        }
        if let Some(position) = pattern.iter().position(|token| token.is_empty_token()) {
            return Err(AutomatonError::EmptyToken { position });
        }

        let mut node = NodeId::ROOT;
        for token in pattern {
            if !self.alphabet.contains(token) {
                self.alphabet.insert(token.clone());
            }
            node = match self.nodes[node.index()].child(token) {
                Some(next) => next,
                None => self.push_child(node, token.clone()),
            };
        }

        let previous = self.nodes[node.index()].set_value(value);
        if previous.is_none() {
            self.num_patterns += 1;
        }
        self.state = State::Stale;
        Ok(previous)
    }

    /// Appends a new node under `parent` and returns its id.
    fn push_child(&mut self, parent: NodeId, token: T) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let depth = self.nodes[parent.index()].depth() + 1;
        self.nodes.push(Node::new(id, depth));
        self.nodes[parent.index()].set_child(token, id);
        id
    }
}
