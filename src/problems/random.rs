//! Seeded random graphs, for tests, benchmarks and the binary.
//!
//! States are `0..num_states`, and every one of them has an adjacency entry, so
//! searches over these graphs never fail.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::space::AdjacencyMap;
use crate::space::Graph;
use crate::space::State;

/// A directed graph where each State gets up to `max_degree` random neighbours.
///
/// Neighbour lists may contain self-loops and repeated entries.
pub fn random_graph<R: rand::Rng>(
    r: &mut R,
    num_states: u32,
    max_degree: usize,
) -> AdjacencyMap<u32> {
    let mut graph = AdjacencyMap::new();
    for s in 0..num_states {
        let degree = r.random_range(0..=max_degree);
        let neighbours: Vec<u32> = (0..degree)
            .map(|_| r.random_range(0..num_states))
            .collect();
        graph.insert(s, neighbours);
    }
    graph
}

/// Random estimates in `0..max_value` for every State in `graph`.
pub fn random_heuristic<R: rand::Rng>(
    r: &mut R,
    graph: &AdjacencyMap<u32>,
    max_value: u32,
) -> FxHashMap<u32, u32> {
    let mut states: Vec<u32> = graph.states().copied().collect();
    // Keys come out in hash order, sort them to keep draws reproducible.
    states.sort_unstable();
    states
        .into_iter()
        .map(|s| (s, r.random_range(0..max_value.max(1))))
        .collect()
}

/// The fewest edges needed to reach each State reachable from `start`.
///
/// A textbook level-by-level traversal, independent of `GraphSearch`. States
/// without an adjacency entry are treated as having no neighbours.
pub fn level_distances<St, G>(graph: &G, start: &St) -> FxHashMap<St, usize>
where
    St: State,
    G: Graph<St>,
{
    let mut distances = FxHashMap::default();
    distances.insert(start.clone(), 0usize);
    let mut queue = VecDeque::from([start.clone()]);

    while let Some(s) = queue.pop_front() {
        let d = distances[&s];
        for n in graph.neighbours(&s).unwrap_or(&[]) {
            if !distances.contains_key(n) {
                distances.insert(n.clone(), d + 1);
                queue.push_back(n.clone());
            }
        }
    }
    distances
}
