use std::cmp::min;

use crate::derank::derank;
use crate::heuristic::Priority;
use crate::search::NodeIndex;

use super::frontier::Frontier;

/// The ranking tuple for Greedy Best-First Search
///
/// We prefer lower priorities, and tie break for earlier insertions so equal
/// priorities come out in FIFO order. A plain heap on the priority alone
/// doesn't guarantee any order among equal values.
///
/// ```
/// use graph_search::data_structures::priority_heap::PriorityRank;
///
/// assert!(PriorityRank::new(1u32, 9) < PriorityRank::new(2u32, 0));
/// assert!(PriorityRank::new(2u32, 0) < PriorityRank::new(2u32, 1));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriorityRank<P>
where
    P: Priority,
{
    priority: P,
    seq: u64,
}

impl<P> PriorityRank<P>
where
    P: Priority,
{
    /// The rank key, `(priority, insertion sequence)`.
    pub fn new(priority: P, seq: u64) -> Self {
        Self { priority, seq }
    }
    pub fn priority(&self) -> P {
        self.priority
    }
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

const HEAP_ARITY: usize = 4usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn first_child(i: usize) -> usize {
    crate::heap_primitives::index_first_child::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn last_child(i: usize) -> usize {
    crate::heap_primitives::index_last_child::<HEAP_ARITY>(i)
}

/// A heap node
///
/// Heap nodes carry just ranking information and an index to the actual search
/// node. This allows heap operations to move as little data as possible.
#[derive(Copy, Clone, Debug)]
pub struct HeapNode<P>
where
    P: Priority,
{
    /// The rank of this node that defines how good it is.
    pub rank: PriorityRank<P>,
    /// The index of this node in the Node Arena. Ignored when ranking.
    pub node_index: NodeIndex,
}

/// PartialEq is forwarded to self.rank's PartialEq
impl<P: Priority> PartialEq for HeapNode<P> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<P: Priority> Eq for HeapNode<P> {}

/// PartialOrd is forwarded to Ord::cmp
impl<P: Priority> PartialOrd for HeapNode<P> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
/// Ord is forwarded to self.rank's Ord
impl<P: Priority> Ord for HeapNode<P> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Priority frontier, for Greedy Best-First Search.
///
/// A 4-ary min-heap of `HeapNode`s.
#[derive(Debug)]
pub struct PriorityFrontier<P>
where
    P: Priority,
{
    heap: Vec<HeapNode<P>>,
    /// Insertion counter, feeds `PriorityRank::seq`.
    next_seq: u64,
}

impl<P> PriorityFrontier<P>
where
    P: Priority,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: vec![],
            next_seq: 0u64,
        }
    }
    #[must_use]
    pub fn with_capacity(s: usize) -> Self {
        Self {
            heap: Vec::with_capacity(s),
            next_seq: 0u64,
        }
    }

    /// The best rank, the one `pop` would return next.
    pub fn peek(&self) -> Option<&PriorityRank<P>> {
        self.heap.first().map(|n| &n.rank)
    }

    pub fn push(&mut self, node_index: NodeIndex, priority: P) {
        self.verify_heap();

        let rank = PriorityRank::new(priority, self.next_seq);
        self.next_seq += 1;
        self.heap.push(HeapNode { rank, node_index });
        self.sift_up(self.heap.len() - 1);

        self.verify_heap();
    }

    pub fn pop(&mut self) -> Option<NodeIndex> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Pop");

        if self.heap.len() <= 1 {
            return self.heap.pop().map(|n| n.node_index);
        }

        let heap_node = self.pop_non_trivial_heap();
        self.verify_heap();
        Some(heap_node.node_index)
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            debug_assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    // Implementation details

    /// Pops the top node from a Heap with at least 2 elements.
    ///
    /// Works by unfairly sifting down the top-node to the last level, where it
    /// can be swapped with the very last element of the array and popped.
    /// Temporarily breaks invariants around the node sifting down unfairly.
    fn pop_non_trivial_heap(&mut self) -> HeapNode<P> {
        debug_assert!(
            self.heap.len() > 1,
            "It doesn't get easier. Why are you calling this?"
        );

        // 1. Pretend there's a hole at the root, and bubble the best child up
        //    till the hole reaches the bottom.
        // 2. If the hole is not the last element, swap it for the last one and
        //    sift that one up.
        // 3. Now the last element is the one that was at the top, pop it.
        let len = self.heap.len();
        let last = len - 1;

        let mut hole = 0;
        loop {
            let child = first_child(hole);
            if child >= len {
                break;
            }
            debug_assert_eq!(child + HEAP_ARITY, last_child(hole) + 1);
            let best = child + derank(&self.heap[child..min(child + HEAP_ARITY, len)]);

            self.heap.swap(hole, best);
            hole = best;
        }
        // NOTE: The hole made it to the last level, but it may not be at the
        // end of the array.
        debug_assert!(hole > up(last) || last == 0);
        if hole != last {
            self.heap.swap(hole, last);
            self.sift_up(hole);
        }

        match self.heap.pop() {
            Some(heap_node) => heap_node,
            None => unreachable!("Heap had at least 2 elements"),
        }
    }

    /// Raises a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, index: usize) -> usize {
        debug_assert!(index < self.heap.len(), "Index out of bounds...");

        let mut pos = index;
        while pos > 0 {
            let parent = up(pos);
            if self.heap[parent] <= self.heap[pos] {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }
}

impl<P> Default for PriorityFrontier<P>
where
    P: Priority,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Frontier<P> for PriorityFrontier<P>
where
    P: Priority,
{
    #[inline(always)]
    fn insert(&mut self, node: NodeIndex, priority: P) {
        self.push(node, priority);
    }
    #[inline(always)]
    fn extract_next(&mut self) -> Option<NodeIndex> {
        self.pop()
    }
    #[inline(always)]
    fn len(&self) -> usize {
        self.heap.len()
    }
    fn clear(&mut self) {
        self.heap.clear();
    }
    fn allocated_bytes(&self) -> usize {
        self.heap.capacity() * std::mem::size_of::<HeapNode<P>>()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::search::Node;
    use crate::search::SearchTree;

    /// A tree whose i-th node holds `priorities[i]`.
    fn tree(priorities: &[u32]) -> (SearchTree<usize, u32>, Vec<NodeIndex>) {
        let mut tree = SearchTree::new();
        let ids = priorities
            .iter()
            .enumerate()
            .map(|(i, p)| tree.push(Node::new_ranked(i, None, *p)))
            .collect();
        (tree, ids)
    }

    #[test]
    fn heap_works() {
        let (_, ids) = tree(&[7]);
        let mut heap = PriorityFrontier::new();

        heap.push(ids[0], 7u32);
        assert_eq!(heap.peek(), Some(&PriorityRank::new(7u32, 0)));
        assert_eq!(heap.pop(), Some(ids[0]));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn heap_sorts() {
        let priorities = [3u32, 5, 6, 1, 4, 2];
        let (tree, ids) = tree(&priorities);
        let mut heap = PriorityFrontier::new();
        for (i, p) in ids.iter().zip(priorities) {
            heap.push(*i, p);
        }

        let popped: Vec<u32> = std::iter::from_fn(|| heap.pop())
            .map(|i| tree[i].priority())
            .collect();
        assert_eq!(popped, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn ties_come_out_in_insertion_order() {
        let priorities = [4u32, 3, 4, 4, 3, 0, 4, 4, 4, 4, 4];
        let (_, ids) = tree(&priorities);
        let mut heap = PriorityFrontier::new();
        for (i, p) in ids.iter().zip(priorities) {
            heap.push(*i, p);
        }

        let popped: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|i| i.get()).collect();
        assert_eq!(popped, vec![5, 1, 4, 0, 2, 3, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn matches_stable_sort_under_interleaving() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let priorities: Vec<u32> = (0..500).map(|_| rng.random_range(0..16u32)).collect();
        let (_, ids) = tree(&priorities);

        let mut heap = PriorityFrontier::with_capacity(ids.len());
        // (priority, insertion) pairs, kept sorted as a reference.
        let mut reference: Vec<(u32, usize)> = vec![];
        for (i, p) in ids.iter().zip(priorities.iter()) {
            heap.push(*i, *p);
            reference.push((*p, i.get()));
            if rng.random_bool(0.3) {
                reference.sort();
                let expected = reference.remove(0);
                assert_eq!(heap.pop().map(|n| n.get()), Some(expected.1));
            }
        }
        reference.sort();
        for (_, expected) in reference {
            assert_eq!(heap.pop().map(|n| n.get()), Some(expected));
        }
        assert!(Frontier::is_empty(&heap));
    }
}
