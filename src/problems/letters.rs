//! Small hand-made graphs over letters.
//!
//! ```text
//!         A
//!       /   \
//!      B     C
//!     / \   / \
//!    D   E F   G
//!        |
//!        H
//! ```
//!
//! The shortcut graph adds an `F -> H` edge.

use rustc_hash::FxHashMap;

use crate::space::AdjacencyMap;

/// The letter tree, neighbours listed left to right.
pub fn tree_graph() -> AdjacencyMap<char> {
    AdjacencyMap::from([
        ('A', vec!['B', 'C']),
        ('B', vec!['D', 'E']),
        ('C', vec!['F', 'G']),
        ('D', vec![]),
        ('E', vec!['H']),
        ('F', vec![]),
        ('G', vec![]),
        ('H', vec![]),
    ])
}

/// Estimates for the letter tree that lead straight down to `H`.
pub fn tree_heuristic() -> FxHashMap<char, u32> {
    FxHashMap::from_iter([
        ('A', 6),
        ('B', 3),
        ('C', 4),
        ('D', 3),
        ('E', 2),
        ('F', 6),
        ('G', 6),
        ('H', 0),
    ])
}

/// The letter tree with an extra `F -> H` edge.
pub fn shortcut_graph() -> AdjacencyMap<char> {
    let mut graph = tree_graph();
    graph.add_edge('F', 'H');
    graph
}

/// Estimates for the shortcut graph that lure Greedy into `C`.
pub fn shortcut_heuristic() -> FxHashMap<char, u32> {
    FxHashMap::from_iter([
        ('A', 6),
        ('B', 3),
        ('C', 4),
        ('D', 6),
        ('E', 4),
        ('F', 2),
        ('G', 6),
        ('H', 0),
    ])
}
