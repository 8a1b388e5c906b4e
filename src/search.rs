use nonmax::NonMaxUsize;

use crate::heuristic::Priority;
use crate::path::Path;
use crate::space::State;

/// A reference to a `Node<St, P>` in a `SearchTree`.
///
/// Indices only grow, so they double as the node's insertion order.
/// `NonMaxUsize` keeps `Option<NodeIndex>` as wide as a `usize`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex {
    index: NonMaxUsize,
}

impl NodeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self {
            // An arena can't hold usize::MAX nodes, memory runs out first.
            index: NonMaxUsize::new(index).expect("SearchTree ran out of indices"),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.index.get()
    }
}

/// One discovered occurrence of a State.
///
/// A State reachable through several unexpanded parents may get several Nodes,
/// only the first one popped gets expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<St, P>
where
    St: State,
    P: Priority,
{
    pub(crate) state: St,
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) priority: P,
}

impl<St, P> Node<St, P>
where
    St: State,
    P: Priority,
{
    /// A root Node with the default priority.
    pub fn new(state: St) -> Self {
        Self::new_ranked(state, None, P::zero())
    }

    pub fn new_ranked(state: St, parent: Option<NodeIndex>, priority: P) -> Self {
        Self {
            state,
            parent,
            priority,
        }
    }

    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }
    #[inline(always)]
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }
    #[inline(always)]
    pub fn priority(&self) -> P {
        self.priority
    }
}

/// All the Nodes of a search.
///
/// Nodes only point back to their parent, and only to Nodes that were pushed
/// before them, so the parent links form a forest without cycles.
pub struct SearchTree<St, P>
where
    St: State,
    P: Priority,
{
    nodes: Vec<Node<St, P>>,
}

impl<St, P> SearchTree<St, P>
where
    St: State,
    P: Priority,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: vec![] }
    }

    #[inline(always)]
    pub fn push(&mut self, node: Node<St, P>) -> NodeIndex {
        let index = NodeIndex::new(self.nodes.len());
        debug_assert!(
            node.parent.is_none_or(|p| p < index),
            "Nodes can only be created forward from existing Nodes"
        );
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of parent hops from a Node to its root.
    #[must_use]
    pub fn depth(&self, mut node_index: NodeIndex) -> usize {
        let mut depth = 0usize;
        while let Some(parent_index) = self[node_index].parent {
            depth += 1;
            node_index = parent_index;
        }
        depth
    }

    /// Walks back the parents of a Node to build the Path that reached it.
    #[must_use]
    pub fn path(&self, mut node_index: NodeIndex) -> Path<St> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut states = vec![self[node_index].state.clone()];
        while let Some(parent_index) = self[node_index].parent {
            debug_assert!(parent_index < node_index);
            states.push(self[parent_index].state.clone());
            node_index = parent_index;
        }

        states.reverse();
        Path::new(states)
    }
}

impl<St, P> Default for SearchTree<St, P>
where
    St: State,
    P: Priority,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, P> std::ops::Index<NodeIndex> for SearchTree<St, P>
where
    St: State,
    P: Priority,
{
    type Output = Node<St, P>;

    #[inline(always)]
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index.get()]
    }
}

impl<St, P> std::fmt::Debug for SearchTree<St, P>
where
    St: State,
    P: Priority,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_a_single_state() {
        let mut tree = SearchTree::<char, u8>::new();
        let root = tree.push(Node::new('X'));

        assert_eq!(tree.depth(root), 0);
        assert_eq!(tree.path(root).states(), &['X']);
    }

    #[test]
    fn path_follows_parents() {
        let mut tree = SearchTree::<char, u32>::new();
        let a = tree.push(Node::new('A'));
        let b = tree.push(Node::new_ranked('B', Some(a), 3));
        let _c = tree.push(Node::new_ranked('C', Some(a), 4));
        let e = tree.push(Node::new_ranked('E', Some(b), 4));
        let h = tree.push(Node::new_ranked('H', Some(e), 0));

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.depth(h), 3);
        let path = tree.path(h);
        assert_eq!(path.len(), tree.depth(h) + 1);
        assert_eq!(path.states(), &['A', 'B', 'E', 'H']);
        assert_eq!(tree[b].priority(), 3);
        assert_eq!(tree[b].parent(), Some(a));
    }

    #[test]
    fn indices_follow_insertion_order() {
        let mut tree = SearchTree::<u64, u8>::new();
        let first = tree.push(Node::new(7));
        let second = tree.push(Node::new(7));

        assert!(first < second);
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn option_index_is_pointer_wide() {
        assert_eq!(
            std::mem::size_of::<Option<NodeIndex>>(),
            std::mem::size_of::<usize>()
        );
    }
}
