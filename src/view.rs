use std::ops::Range;

use crate::compile::next_state;
use crate::overlap::remove_overlaps;
use crate::{Node, NodeId, OverlapPolicy, Token};

/// One occurrence of a pattern in a scanned sequence.
///
/// `start` is inclusive and `end` exclusive, both in token offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Match<V> {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) value: V,
}

impl<V> Match<V> {
    #[inline]
    pub(crate) fn new(start: usize, end: usize, value: V) -> Self {
        Self { start, end, value }
    }

    /// Offset of the first matched token.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last matched token.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The matched span as a range, usable to slice the haystack.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The payload of the matched pattern.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consumes the match, returning its payload.
    #[inline]
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V: Clone> Match<&V> {
    /// Clones the borrowed payload into an owned match.
    #[inline]
    pub fn cloned(self) -> Match<V> {
        Match::new(self.start, self.end, self.value.clone())
    }
}

/// A read-only view of a compiled automaton.
///
/// Obtained from [`Automaton::searcher`](crate::Automaton::searcher) or
/// [`Automaton::try_searcher`](crate::Automaton::try_searcher). The view is
/// `Copy` and, for `Sync` tokens and values, can be shared across threads;
/// the borrow on the automaton keeps it from being modified meanwhile.
pub struct Searcher<'a, T, V> {
    nodes: &'a [Node<T, V>],
    failure: &'a [NodeId],
    overlap_policy: OverlapPolicy,
}

impl<T, V> Clone for Searcher<'_, T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Searcher<'_, T, V> {}

impl<'a, T: Token, V> Searcher<'a, T, V> {
    pub(crate) fn new(
        nodes: &'a [Node<T, V>],
        failure: &'a [NodeId],
        overlap_policy: OverlapPolicy,
    ) -> Self {
        debug_assert_eq!(nodes.len(), failure.len());
        Self {
            nodes,
            failure,
            overlap_policy,
        }
    }

    /// Returns an iterator over every match in `text`, overlapping ones
    /// included, ordered by end offset.
    ///
    /// Matches sharing an end offset come longest first: the pattern ending at
    /// the current state, then the ones inherited along its failure chain.
    pub fn find_iter<'t>(&self, text: &'t [T]) -> FindIter<'a, 't, T, V> {
        FindIter {
            searcher: *self,
            text,
            pos: 0,
            state: NodeId::ROOT,
            pending: &[],
        }
    }

    /// Returns true if any pattern occurs in `text`.
    pub fn is_match(&self, text: &[T]) -> bool {
        self.find_iter(text).next().is_some()
    }

    /// Collects the matches in `text`.
    ///
    /// With `exclude_overlaps`, the result is reduced to a disjoint subset
    /// ordered by start, using the automaton's [`OverlapPolicy`].
    pub fn get_matches(&self, text: &[T], exclude_overlaps: bool) -> Vec<Match<&'a V>> {
        let matches: Vec<_> = self.find_iter(text).collect();
        if exclude_overlaps {
            remove_overlaps(matches, self.overlap_policy)
        } else {
            matches
        }
    }

    /// The policy applied by `get_matches(.., true)`.
    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap_policy
    }
}

/// Streaming iterator over the matches of a [`Searcher`] in a token slice.
pub struct FindIter<'a, 't, T, V> {
    searcher: Searcher<'a, T, V>,
    text: &'t [T],
    /// Number of tokens consumed so far.
    pos: usize,
    state: NodeId,
    /// Outputs of `state` not yet reported.
    pending: &'a [NodeId],
}

impl<'a, T: Token, V> Iterator for FindIter<'a, '_, T, V> {
    type Item = Match<&'a V>;

    fn next(&mut self) -> Option<Match<&'a V>> {
        let nodes = self.searcher.nodes;
        loop {
            while let Some((&id, rest)) = self.pending.split_first() {
                self.pending = rest;
                let node = &nodes[id.index()];
                if let Some(value) = node.value() {
                    return Some(Match::new(self.pos - node.depth(), self.pos, value));
                }
            }

            let token = self.text.get(self.pos)?;
            self.state = next_state(nodes, self.searcher.failure, self.state, token);
            self.pos += 1;
            self.pending = nodes[self.state.index()].outputs();
        }
    }
}
