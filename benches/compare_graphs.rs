use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use hrsw::Stopwatch;
use human_duration::human_duration;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use graph_search::algorithms::Algorithm;
use graph_search::problem::GraphProblem;

/// Maximum time willing to wait for a single benchmark instance.
/// Experiments are carried out at least 5s and at least 100 times, so running a
/// 1s instance takes 1m40s.
const MAX_INSTANCE_TIME: Duration = Duration::from_secs(1);

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random Graph Search");

    for num_states in [1_000u32, 10_000, 100_000] {
        for i in 0..3 {
            let instance_name = format!("random[{num_states}]:{i}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);
            let Some(problem) = GraphProblem::random(&mut rng, num_states, 4) else {
                continue;
            };

            for algorithm in Algorithm::ALL {
                let mut stopwatch = Stopwatch::new_started();
                let found = problem.solve(algorithm);
                stopwatch.stop();
                let elapsed = stopwatch.elapsed();
                if elapsed > MAX_INSTANCE_TIME {
                    log::warn!(
                        "Skipping {instance_name} as it takes too long with {algorithm} ({})",
                        human_duration(&elapsed)
                    );
                    continue;
                }
                if let Ok(Some(path)) = &found {
                    println!("{algorithm} path on {instance_name}: {} edges", path.edges());
                }

                group.bench_with_input(
                    BenchmarkId::new(algorithm.to_string(), &instance_name),
                    &problem,
                    |b, p| b.iter(|| p.solve(algorithm)),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
