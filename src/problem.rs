use rustc_hash::FxHashMap;

use crate::algorithms::Algorithm;
use crate::algorithms::DuplicatePolicy;
use crate::algorithms::SearchConfig;
use crate::algorithms::bfs::BreadthFirstSearch;
use crate::algorithms::dfs::DepthFirstSearch;
use crate::algorithms::greedy::GreedyBestFirstSearch;
use crate::error::SearchError;
use crate::heuristic::Priority;
use crate::path::Path;
use crate::problems::letters;
use crate::problems::random;
use crate::space::AdjacencyMap;
use crate::space::State;
use crate::trace::TraceSink;

/// A search problem: a graph, where to start, where to go, and optionally how
/// far each State seems to be from the goal.
#[derive(Clone, Debug)]
pub struct GraphProblem<St, H>
where
    St: State,
    H: Priority,
{
    pub start: St,
    pub goal: St,
    pub graph: AdjacencyMap<St>,
    pub heuristic: Option<FxHashMap<St, H>>,
    /// Overrides each algorithm's default duplicate policy.
    pub duplicates: Option<DuplicatePolicy>,
}

impl<St, H> GraphProblem<St, H>
where
    St: State,
    H: Priority,
{
    pub fn new(start: St, goal: St, graph: AdjacencyMap<St>) -> Self {
        Self {
            start,
            goal,
            graph,
            heuristic: None,
            duplicates: None,
        }
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: FxHashMap<St, H>) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = Some(duplicates);
        self
    }

    /// The configuration `algorithm` runs with on this problem.
    pub fn config(&self, algorithm: Algorithm) -> SearchConfig {
        let mut config = algorithm.default_config();
        if let Some(duplicates) = self.duplicates {
            config.duplicates = duplicates;
        }
        config
    }

    /// Whether `algorithm` can run on this problem at all.
    pub fn supports(&self, algorithm: Algorithm) -> bool {
        !algorithm.is_informed() || self.heuristic.is_some()
    }

    pub fn solve(&self, algorithm: Algorithm) -> Result<Option<Path<St>>, SearchError<St>> {
        self.solve_traced(algorithm, ())
    }

    /// Runs `algorithm`, reporting expansions to `trace`.
    ///
    /// Greedy needs a heuristic, without one it fails on the start State.
    pub fn solve_traced<T>(
        &self,
        algorithm: Algorithm,
        trace: T,
    ) -> Result<Option<Path<St>>, SearchError<St>>
    where
        T: TraceSink<St>,
    {
        log::info!("Solving {algorithm} from {:?} to {:?}", self.start, self.goal);
        let config = self.config(algorithm);
        let (start, goal, graph) = (self.start.clone(), self.goal.clone(), &self.graph);
        match algorithm {
            Algorithm::BreadthFirst => BreadthFirstSearch::new(start, goal, graph)
                .with_config(config)
                .with_trace(trace)
                .find_path(),
            Algorithm::DepthFirst => DepthFirstSearch::new(start, goal, graph)
                .with_config(config)
                .with_trace(trace)
                .find_path(),
            Algorithm::GreedyBestFirst => match &self.heuristic {
                Some(h) => GreedyBestFirstSearch::new(start, goal, graph, h)
                    .with_config(config)
                    .with_trace(trace)
                    .find_path(),
                None => {
                    // Same outcome as an empty heuristic.
                    let empty: FxHashMap<St, H> = FxHashMap::default();
                    GreedyBestFirstSearch::new(start, goal, graph, &empty)
                        .with_config(config)
                        .with_trace(trace)
                        .find_path()
                }
            },
        }
    }
}

impl GraphProblem<char, u32> {
    /// The letter tree, from `A` to `H`.
    pub fn letter_tree() -> Self {
        GraphProblem::new('A', 'H', letters::tree_graph()).with_heuristic(letters::tree_heuristic())
    }

    /// The letter tree with a shortcut into `H`, from `A` to `H`.
    pub fn letter_shortcut() -> Self {
        GraphProblem::new('A', 'H', letters::shortcut_graph())
            .with_heuristic(letters::shortcut_heuristic())
    }
}

impl GraphProblem<u32, u32> {
    /// A random graph over `0..num_states`, with random start, goal and
    /// estimates. `None` when there are no States to pick from.
    pub fn random<R: rand::Rng>(r: &mut R, num_states: u32, max_degree: usize) -> Option<Self> {
        if num_states == 0 {
            return None;
        }
        let graph = random::random_graph(r, num_states, max_degree);
        let heuristic = random::random_heuristic(r, &graph, num_states);
        let start = r.random_range(0..num_states);
        let goal = r.random_range(0..num_states);
        Some(GraphProblem::new(start, goal, graph).with_heuristic(heuristic))
    }

    /// Picks a new random start and goal on the same graph.
    pub fn randomize<R: rand::Rng>(&mut self, r: &mut R) {
        let num_states = self.graph.len() as u32;
        if num_states == 0 {
            return;
        }
        self.start = r.random_range(0..num_states);
        self.goal = r.random_range(0..num_states);
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::trace::Trace;

    #[test]
    fn letter_problems() {
        let tree = GraphProblem::letter_tree();
        let shortcut = GraphProblem::letter_shortcut();
        let solve = |p: &GraphProblem<char, u32>, a| p.solve(a).unwrap().unwrap().into_states();

        assert_eq!(solve(&tree, Algorithm::BreadthFirst), vec!['A', 'B', 'E', 'H']);
        assert_eq!(solve(&tree, Algorithm::DepthFirst), vec!['A', 'B', 'E', 'H']);
        assert_eq!(solve(&tree, Algorithm::GreedyBestFirst), vec!['A', 'B', 'E', 'H']);
        assert_eq!(solve(&shortcut, Algorithm::BreadthFirst), vec!['A', 'B', 'E', 'H']);
        assert_eq!(solve(&shortcut, Algorithm::GreedyBestFirst), vec!['A', 'C', 'F', 'H']);
    }

    #[test]
    fn greedy_without_heuristic() {
        let problem: GraphProblem<char, u32> =
            GraphProblem::new('A', 'H', letters::tree_graph());
        assert!(!problem.supports(Algorithm::GreedyBestFirst));
        assert!(problem.supports(Algorithm::DepthFirst));

        let mut trace = Trace::new();
        assert_eq!(
            problem.solve_traced(Algorithm::GreedyBestFirst, &mut trace),
            Err(SearchError::MissingHeuristicEntry { state: 'A' })
        );
        assert!(trace.expansions().is_empty());
        assert!(problem.solve(Algorithm::BreadthFirst).unwrap().is_some());
    }

    #[test]
    fn duplicate_policy_override() {
        let problem = GraphProblem::letter_tree();
        assert_eq!(
            problem.config(Algorithm::BreadthFirst).duplicates,
            DuplicatePolicy::SkipQueued
        );
        let problem = problem.with_duplicate_policy(DuplicatePolicy::VisitedOnly);
        assert_eq!(
            problem.config(Algorithm::BreadthFirst).duplicates,
            DuplicatePolicy::VisitedOnly
        );

        let mut trace = Trace::new();
        problem
            .solve_traced(Algorithm::DepthFirst, &mut trace)
            .unwrap();
        assert_eq!(trace.expansions(), &['A', 'C', 'G', 'F', 'B', 'E', 'H']);
    }

    #[test]
    fn random_problems() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(GraphProblem::random(&mut rng, 0, 3).is_none());

        let mut problem = GraphProblem::random(&mut rng, 64, 3).unwrap();
        for _ in 0..20 {
            problem.randomize(&mut rng);
            assert!(problem.start < 64 && problem.goal < 64);

            let found: Vec<_> = Algorithm::ALL
                .iter()
                .map(|a| problem.solve(*a).unwrap().is_some())
                .collect();
            assert!(found.iter().all(|f| *f == found[0]));
        }
    }
}
