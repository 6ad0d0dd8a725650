use std::collections::BTreeMap;
use std::fmt;

use crate::Token;

/// Dense index of a node in the automaton's node table.
///
/// Ids are assigned sequentially at creation and never reused. `NodeId::ROOT`
/// (0) is the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Returns the id as an index into the node table.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns true if this is the root id.
    #[inline]
    pub fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex of the pattern trie.
///
/// - `depth`: number of tokens on the path from the root (root is 0)
/// - `outgoing`: token → child, each child owned by exactly one parent
/// - `value`: payload of the pattern ending here, if any
/// - `outputs`: nodes whose values are reported when the scan reaches this
///   node; itself first if terminal, then inherited ones once compiled
#[derive(Clone, Debug)]
pub struct Node<T, V> {
    id: NodeId,
    depth: usize,
    outgoing: BTreeMap<T, NodeId>,
    value: Option<V>,
    outputs: Vec<NodeId>,
}

impl<T: Token, V> Node<T, V> {
    pub(crate) fn new(id: NodeId, depth: usize) -> Self {
        Self {
            id,
            depth,
            outgoing: BTreeMap::new(),
            value: None,
            outputs: Vec::new(),
        }
    }

    /// Returns this node's id.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the length of the token path from the root to this node.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if this node is the root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// Returns the payload of the pattern ending at this node.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Returns true if some inserted pattern ends exactly here.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// Returns the child reached by `token`, if any.
    #[inline]
    pub fn child(&self, token: &T) -> Option<NodeId> {
        self.outgoing.get(token).copied()
    }

    /// Returns true if this node has no outgoing transitions.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.outgoing.is_empty()
    }

    /// Iterates over outgoing transitions in token order.
    pub fn transitions(&self) -> impl DoubleEndedIterator<Item = (&T, NodeId)> + '_ {
        self.outgoing.iter().map(|(token, &id)| (token, id))
    }

    /// Returns the nodes reported when the scan is at this node.
    ///
    /// Before the first compilation this holds at most the node itself.
    #[inline]
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    pub(crate) fn set_child(&mut self, token: T, child: NodeId) {
        debug_assert_ne!(child, self.id, "trie edges never loop");
        self.outgoing.insert(token, child);
    }

    /// Stores the payload and registers the node as its own output.
    /// Returns the payload it replaced.
    pub(crate) fn set_value(&mut self, value: V) -> Option<V> {
        if !self.outputs.contains(&self.id) {
            self.outputs.insert(0, self.id);
        }
        self.value.replace(value)
    }

    /// Drops inherited outputs, keeping only the node itself if terminal.
    pub(crate) fn reset_outputs(&mut self) {
        self.outputs.clear();
        if self.value.is_some() {
            self.outputs.push(self.id);
        }
    }

    pub(crate) fn extend_outputs(&mut self, inherited: &[NodeId]) {
        self.outputs.extend_from_slice(inherited);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_id() {
        assert!(NodeId::ROOT.is_root());
        assert_eq!(NodeId::ROOT.index(), 0);
        assert!(!NodeId::new(3).is_root());
        assert_eq!(NodeId::new(3).to_string(), "#3");
    }

    #[test]
    fn new_node_is_non_terminal() {
        let n: Node<char, u32> = Node::new(NodeId::new(1), 1);
        assert_eq!(n.id(), NodeId::new(1));
        assert_eq!(n.depth(), 1);
        assert!(!n.is_root());
        assert!(!n.is_terminal());
        assert!(n.is_leaf());
        assert!(n.outputs().is_empty());
        assert_eq!(n.value(), None);
    }

    #[test]
    fn set_value_registers_self_once() {
        let mut n: Node<char, &str> = Node::new(NodeId::new(2), 2);
        assert_eq!(n.set_value("a"), None);
        assert_eq!(n.set_value("b"), Some("a"));
        assert_eq!(n.value(), Some(&"b"));
        assert_eq!(n.outputs(), &[NodeId::new(2)]);
    }

    #[test]
    fn reset_outputs_keeps_terminal_self() {
        let mut n: Node<char, u8> = Node::new(NodeId::new(4), 3);
        n.set_value(1);
        n.extend_outputs(&[NodeId::new(2), NodeId::new(1)]);
        assert_eq!(n.outputs().len(), 3);
        n.reset_outputs();
        assert_eq!(n.outputs(), &[NodeId::new(4)]);

        let mut m: Node<char, u8> = Node::new(NodeId::new(5), 1);
        m.extend_outputs(&[NodeId::new(4)]);
        m.reset_outputs();
        assert!(m.outputs().is_empty());
    }

    #[test]
    fn transitions_in_token_order() {
        let mut n: Node<char, ()> = Node::new(NodeId::ROOT, 0);
        n.set_child('z', NodeId::new(1));
        n.set_child('a', NodeId::new(2));
        let t: Vec<_> = n.transitions().collect();
        assert_eq!(t, vec![(&'a', NodeId::new(2)), (&'z', NodeId::new(1))]);
        let last = n.transitions().next_back();
        assert_eq!(last, Some((&'z', NodeId::new(1))));
        assert_eq!(n.child(&'a'), Some(NodeId::new(2)));
        assert_eq!(n.child(&'b'), None);
        assert!(!n.is_leaf());
    }
}
