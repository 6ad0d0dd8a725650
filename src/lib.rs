//! An Aho-Corasick automaton over sequences of arbitrary tokens.
//!
//! This crate provides [`Automaton`], a pattern trie augmented with failure
//! links. Patterns are sequences of [`Token`]s (bytes, `char`s, words, ...)
//! mapped to a payload. A single left-to-right scan of a token sequence
//! reports every occurrence of every pattern, overlapping ones included.
//!
//! Failure links are compiled lazily: inserting a pattern marks the automaton
//! stale, and the next scan rebuilds the links from scratch.
//!
//! # Quick start
//!
//! ```
//! use token_aho::Automaton;
//!
//! let mut ac = Automaton::new();
//! for (word, id) in [("he", 1), ("she", 2), ("his", 3), ("hers", 4)] {
//!     ac.add(&word.chars().collect::<Vec<_>>(), id).unwrap();
//! }
//!
//! let text: Vec<char> = "ushers".chars().collect();
//! let spans: Vec<_> = ac
//!     .get_matches(&text, false)
//!     .iter()
//!     .map(|m| (m.start(), m.end(), *m.value()))
//!     .collect();
//! assert_eq!(spans, vec![(1, 4, 2), (2, 4, 1), (2, 6, 4)]);
//! ```

#![warn(missing_docs)]

mod build;
mod compile;
mod config;
mod node;
mod overlap;
mod search;
mod token;
mod view;

use std::collections::BTreeSet;
use std::fmt;

pub use config::Config;
pub use node::{Node, NodeId};
pub use overlap::OverlapPolicy;
pub use search::{PatternEntry, PredictiveIter};
pub use token::Token;
pub use view::{FindIter, Match, Searcher};

/// Errors that can occur during automaton operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    /// A pattern with no tokens was inserted.
    #[error("pattern is empty")]
    EmptyPattern,
    /// A pattern contained a token that carries no content.
    #[error("empty token at position {position}")]
    EmptyToken {
        /// Offset of the offending token within the pattern.
        position: usize,
    },
    /// A read-only scan was requested while patterns await compilation.
    #[error("automaton has uncompiled insertions")]
    NotCompiled,
}

/// Result type using [`AutomatonError`].
pub type Result<T> = std::result::Result<T, AutomatonError>;

/// Whether the failure table reflects the current trie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum State {
    Stale,
    Compiled,
}

/// A multi-pattern matcher over token sequences.
///
/// Nodes live in an append-only table indexed by [`NodeId`]; trie edges,
/// failure links, and output sets all refer to nodes by id.
#[derive(Clone, Debug)]
pub struct Automaton<T, V> {
    pub(crate) nodes: Vec<Node<T, V>>,
    pub(crate) alphabet: BTreeSet<T>,
    /// Failure target per node; only meaningful while compiled.
    pub(crate) failure: Vec<NodeId>,
    pub(crate) state: State,
    pub(crate) num_patterns: usize,
    config: Config,
}

impl<T: Token, V> Default for Automaton<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Token, V> Automaton<T, V> {
    /// Creates an empty automaton holding only the root.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty automaton with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: vec![Node::new(NodeId::ROOT, 0)],
            alphabet: BTreeSet::new(),
            failure: vec![NodeId::ROOT],
            state: State::Stale,
            num_patterns: 0,
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Changes how overlapping matches are resolved. Does not require
    /// recompilation.
    pub fn set_overlap_policy(&mut self, policy: OverlapPolicy) {
        self.config.overlap_policy = policy;
    }

    /// Returns the number of nodes in the trie, root included.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct inserted patterns.
    pub fn num_patterns(&self) -> usize {
        self.num_patterns
    }

    /// Returns true if no pattern has been inserted.
    pub fn is_empty(&self) -> bool {
        self.num_patterns == 0
    }

    /// Returns every token that occurs in some inserted pattern.
    pub fn alphabet(&self) -> &BTreeSet<T> {
        &self.alphabet
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&Node<T, V>> {
        self.nodes.get(id.index())
    }

    /// Returns true if failure links are up to date with the trie.
    pub fn is_compiled(&self) -> bool {
        self.state == State::Compiled
    }

    /// Compiles if stale and returns a read-only view for scanning.
    pub fn searcher(&mut self) -> Searcher<'_, T, V> {
        if self.state == State::Stale {
            self.update_automaton();
        }
        Searcher::new(&self.nodes, &self.failure, self.config.overlap_policy)
    }

    /// Returns a read-only view without compiling.
    ///
    /// # Errors
    /// [`AutomatonError::NotCompiled`] if patterns were inserted since the
    /// last compilation; call [`update_automaton`](Self::update_automaton)
    /// first.
    pub fn try_searcher(&self) -> Result<Searcher<'_, T, V>> {
        match self.state {
            State::Compiled => Ok(Searcher::new(
                &self.nodes,
                &self.failure,
                self.config.overlap_policy,
            )),
            State::Stale => Err(AutomatonError::NotCompiled),
        }
    }

    /// Scans `text` and returns every match, compiling first if stale.
    ///
    /// Matches are ordered by end offset. With `exclude_overlaps` they are
    /// reduced to a disjoint subset ordered by start, according to the
    /// configured [`OverlapPolicy`].
    pub fn get_matches(&mut self, text: &[T], exclude_overlaps: bool) -> Vec<Match<V>>
    where
        V: Clone,
    {
        self.searcher()
            .get_matches(text, exclude_overlaps)
            .into_iter()
            .map(Match::cloned)
            .collect()
    }

    /// Queues the children of `id` for a pre-order walk, smallest token on top.
    fn push_children<'a>(
        &'a self,
        stack: &mut Vec<(&'a T, NodeId, usize)>,
        id: NodeId,
        indent: usize,
    ) {
        for (token, child) in self.nodes[id.index()].transitions().rev() {
            stack.push((token, child, indent));
        }
    }
}

impl<T: Token, V: fmt::Debug> fmt::Display for Automaton<T, V> {
    /// Renders the trie as an indented tree, one node per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "(root)")?;
        let mut stack = Vec::new();
        self.push_children(&mut stack, NodeId::ROOT, 1);

        while let Some((token, id, indent)) = stack.pop() {
            let node = &self.nodes[id.index()];
            write!(f, "{:width$}{:?} {}", "", token, id, width = indent * 2)?;
            if let Some(value) = node.value() {
                write!(f, " = {value:?}")?;
            }
            writeln!(f)?;
            self.push_children(&mut stack, id, indent + 1);
        }
        Ok(())
    }
}
