use std::fmt::Display;
use std::str::FromStr;

use anstream::println;
use clap::Parser;
use clap::ValueEnum;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing_subscriber::EnvFilter;

use graph_search::algorithms::Algorithm;
use graph_search::algorithms::DuplicatePolicy;
use graph_search::algorithms::GraphSearch;
use graph_search::algorithms::bfs::BreadthFirstSearch;
use graph_search::algorithms::dfs::DepthFirstSearch;
use graph_search::algorithms::greedy::GreedyBestFirstSearch;
use graph_search::data_structures::frontier::Frontier;
use graph_search::heuristic::Ranking;
use graph_search::problem::GraphProblem;
use graph_search::space::Graph;
use graph_search::space::State;
use graph_search::trace::Trace;

#[cfg(feature = "mem_profile")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;
#[cfg(all(not(feature = "mem_profile"), not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Bfs,
    Dfs,
    Greedy,
    All,
}

impl AlgorithmArg {
    fn algorithms(self) -> Vec<Algorithm> {
        match self {
            AlgorithmArg::Bfs => vec![Algorithm::BreadthFirst],
            AlgorithmArg::Dfs => vec![Algorithm::DepthFirst],
            AlgorithmArg::Greedy => vec![Algorithm::GreedyBestFirst],
            AlgorithmArg::All => Algorithm::ALL.to_vec(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GraphArg {
    /// The letter tree, from A to H.
    Tree,
    /// The letter tree with an F -> H shortcut.
    Shortcut,
    /// A seeded random graph over 0..states.
    Random,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DuplicatesArg {
    VisitedOnly,
    SkipQueued,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::VisitedOnly => DuplicatePolicy::VisitedOnly,
            DuplicatesArg::SkipQueued => DuplicatePolicy::SkipQueued,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[clap(long_version = graph_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(short, long, env = "SEARCH_ALGORITHM", value_enum, default_value_t = AlgorithmArg::All)]
    pub algorithm: AlgorithmArg,

    #[arg(short, long, env = "SEARCH_GRAPH", value_enum, default_value_t = GraphArg::Shortcut)]
    pub graph: GraphArg,

    /// Overrides the problem's start State.
    #[arg(long, env = "SEARCH_START")]
    pub start: Option<String>,
    /// Overrides the problem's goal State.
    #[arg(long, env = "SEARCH_GOAL")]
    pub goal: Option<String>,

    #[arg(long, env = "SEARCH_SEED", default_value_t = 0u64)]
    pub seed: u64,
    #[arg(long, env = "SEARCH_STATES", default_value_t = 1_000u32)]
    pub states: u32,
    #[arg(long, env = "SEARCH_DEGREE", default_value_t = 3usize)]
    pub degree: usize,

    /// Overrides each algorithm's duplicate policy.
    #[arg(long, env = "SEARCH_DUPLICATES", value_enum)]
    pub duplicates: Option<DuplicatesArg>,

    /// Prints expanded States in order.
    #[arg(long, env = "SEARCH_TRACE")]
    pub trace: bool,
    /// Prints memory and expansion stats.
    #[arg(long, env = "SEARCH_STATS")]
    pub stats: bool,
    /// Prints the trace as JSON events.
    #[cfg(feature = "serde")]
    #[arg(long, env = "SEARCH_JSON")]
    pub json: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

/// States the binary can print, as JSON too when available.
#[cfg(feature = "serde")]
trait CliState: State + serde::Serialize {}
#[cfg(feature = "serde")]
impl<T> CliState for T where T: State + serde::Serialize {}
#[cfg(not(feature = "serde"))]
trait CliState: State {}
#[cfg(not(feature = "serde"))]
impl<T> CliState for T where T: State {}

fn parse_state<St>(arg: &Option<String>) -> std::io::Result<Option<St>>
where
    St: FromStr,
    St::Err: Display,
{
    arg.as_deref()
        .map(|s| {
            s.parse::<St>()
                .map_err(|e| std::io::Error::other(format!("Invalid State {s:?}. {e}")))
        })
        .transpose()
}

fn run<St, G, F, R>(
    algorithm: Algorithm,
    mut search: GraphSearch<'_, St, G, F, R, Trace<St>>,
    args: &Args,
) -> std::io::Result<()>
where
    St: CliState,
    G: Graph<St>,
    F: Frontier<R::Priority>,
    R: Ranking<St>,
{
    let mut stopwatch = Stopwatch::new_started();
    let result = search.find_path();
    stopwatch.stop();
    let elapsed = human_duration(&stopwatch.elapsed());

    let name = format!("{:>6}", algorithm.to_string());
    match &result {
        Ok(Some(path)) => println!("{}: {} ({elapsed})", name.bold(), path.green()),
        Ok(None) => println!("{}: {} ({elapsed})", name.bold(), "No path".yellow()),
        Err(e) => println!("{}: {} ({elapsed})", name.bold(), e.red()),
    }

    if args.trace {
        println!("  Expanded: {:?}", search.trace().expansions());
    }
    #[cfg(feature = "serde")]
    if args.json {
        for event in search.trace().events() {
            let json = serde_json::to_string(&event).map_err(std::io::Error::other)?;
            println!("{json}");
        }
    }
    if args.stats {
        search.write_stats(anstream::stdout())?;
    }
    Ok(())
}

fn solve<St>(mut problem: GraphProblem<St, u32>, args: &Args) -> std::io::Result<()>
where
    St: CliState + FromStr,
    St::Err: Display,
{
    if let Some(start) = parse_state(&args.start)? {
        problem.start = start;
    }
    if let Some(goal) = parse_state(&args.goal)? {
        problem.goal = goal;
    }
    if let Some(duplicates) = args.duplicates {
        problem = problem.with_duplicate_policy(duplicates.into());
    }

    let missing = problem.graph.missing_keys();
    if !missing.is_empty() {
        log::warn!("{} States have no adjacency entry", missing.len());
    }

    println!(
        "Searching {} from {} to {} ({} States, {} edges)",
        format!("{:?}", args.graph).cyan(),
        format!("{:?}", problem.start).yellow(),
        format!("{:?}", problem.goal).yellow(),
        problem.graph.len(),
        problem.graph.num_edges(),
    );

    for algorithm in args.algorithm.algorithms() {
        let config = problem.config(algorithm);
        let (start, goal, graph) = (problem.start.clone(), problem.goal.clone(), &problem.graph);
        match algorithm {
            Algorithm::BreadthFirst => run(
                algorithm,
                BreadthFirstSearch::new(start, goal, graph)
                    .with_config(config)
                    .with_trace(Trace::new()),
                args,
            )?,
            Algorithm::DepthFirst => run(
                algorithm,
                DepthFirstSearch::new(start, goal, graph)
                    .with_config(config)
                    .with_trace(Trace::new()),
                args,
            )?,
            Algorithm::GreedyBestFirst => match &problem.heuristic {
                Some(h) => run(
                    algorithm,
                    GreedyBestFirstSearch::new(start, goal, graph, h)
                        .with_config(config)
                        .with_trace(Trace::new()),
                    args,
                )?,
                None => println!("{:>6}: {}", algorithm.to_string(), "No heuristic".yellow()),
            },
        }
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    #[cfg(feature = "mem_profile")]
    let _profiler = dhat::Profiler::new_heap();

    let args = Args::parse();
    args.color.write_global();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    log::debug!("{args:?}");

    match args.graph {
        GraphArg::Tree => solve(GraphProblem::letter_tree(), &args),
        GraphArg::Shortcut => solve(GraphProblem::letter_shortcut(), &args),
        GraphArg::Random => {
            let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
            let problem = GraphProblem::random(&mut rng, args.states, args.degree)
                .ok_or_else(|| std::io::Error::other("Random graphs need at least 1 State"))?;
            solve(problem, &args)
        }
    }
}
