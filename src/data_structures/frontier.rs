use std::collections::VecDeque;
use std::fmt::Debug;

use crate::heuristic::Priority;
use crate::search::NodeIndex;

/// An ordering policy over discovered Nodes.
///
/// Frontiers only hold `NodeIndex`es into the search's `SearchTree`, along with
/// the Node's priority for the policies that care about it.
pub trait Frontier<P>: Debug + Default
where
    P: Priority,
{
    fn insert(&mut self, node: NodeIndex, priority: P);

    /// Removes the next Node to expand. `None` once the frontier is exhausted.
    fn extract_next(&mut self) -> Option<NodeIndex>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    /// Bytes currently reserved by the frontier.
    fn allocated_bytes(&self) -> usize;
}

/// First-In First-Out frontier, for Breadth-First Search.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeIndex>,
}

impl<P> Frontier<P> for FifoFrontier
where
    P: Priority,
{
    #[inline(always)]
    fn insert(&mut self, node: NodeIndex, _priority: P) {
        self.queue.push_back(node);
    }
    #[inline(always)]
    fn extract_next(&mut self) -> Option<NodeIndex> {
        self.queue.pop_front()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.queue.len()
    }
    fn clear(&mut self) {
        self.queue.clear();
    }
    fn allocated_bytes(&self) -> usize {
        self.queue.capacity() * std::mem::size_of::<NodeIndex>()
    }
}

/// Last-In First-Out frontier, for Depth-First Search.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<NodeIndex>,
}

impl<P> Frontier<P> for LifoFrontier
where
    P: Priority,
{
    #[inline(always)]
    fn insert(&mut self, node: NodeIndex, _priority: P) {
        self.stack.push(node);
    }
    #[inline(always)]
    fn extract_next(&mut self) -> Option<NodeIndex> {
        self.stack.pop()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.stack.len()
    }
    fn clear(&mut self) {
        self.stack.clear();
    }
    fn allocated_bytes(&self) -> usize {
        self.stack.capacity() * std::mem::size_of::<NodeIndex>()
    }
}
