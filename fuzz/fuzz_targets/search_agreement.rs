//! Fuzz target for the graph searches.
//!
//! Bytes are read as `start, goal, (from, to)*` over 16 States, with an estimate
//! for every State taken from the same bytes. Checks that:
//! - No search panics, even on graphs with missing adjacency entries
//! - Every Path found is a walk over the graph from start to goal
//! - On complete graphs, all algorithms agree on reachability
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run search_agreement
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use rustc_hash::FxHashMap;

use graph_search::algorithms::Algorithm;
use graph_search::problem::GraphProblem;
use graph_search::space::AdjacencyMap;
use graph_search::space::Graph;

const NUM_STATES: u8 = 16;

fuzz_target!(|data: &[u8]| {
    let [start, goal, edges @ ..] = data else {
        return;
    };

    let mut graph = AdjacencyMap::new();
    for edge in edges.chunks_exact(2) {
        graph.add_edge(edge[0] % NUM_STATES, edge[1] % NUM_STATES);
    }
    let heuristic: FxHashMap<u8, u32> = (0..NUM_STATES)
        .map(|s| (s, u32::from(data[usize::from(s) % data.len()])))
        .collect();

    let (start, goal) = (start % NUM_STATES, goal % NUM_STATES);
    let problem = GraphProblem::new(start, goal, graph).with_heuristic(heuristic);
    // Every State a search could expand has an adjacency entry.
    let complete = problem.graph.missing_keys().is_empty()
        && (start == goal || problem.graph.contains(&start));

    let mut reachable = None;
    for algorithm in Algorithm::ALL {
        let Ok(found) = problem.solve(algorithm) else {
            assert!(!complete, "{algorithm} failed on a complete graph");
            continue;
        };
        if let Some(path) = &found {
            assert_eq!(*path.start(), start);
            assert_eq!(*path.end(), goal);
            assert!(path.is_valid_in(&problem.graph));
            assert!(!path.has_repeated_states());
        }
        if complete {
            let r = *reachable.get_or_insert(found.is_some());
            assert_eq!(r, found.is_some(), "{algorithm} disagrees on reachability");
        }
    }
});
