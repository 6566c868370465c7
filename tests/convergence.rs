//! End-to-end convergence scenarios.

use std::path::Path;
use std::sync::Arc;

use u_coloring::dimacs::{parse_dimacs_file, parse_dimacs_str};
use u_coloring::ga::{
    ClusterSelection, CrossoverKind, DriverState, Experiment, ExperimentConfig, MemorySink,
};
use u_coloring::local_search::{LocalSearchConfig, StrategyKind};
use u_coloring::models::Connections;

fn square() -> Arc<Connections> {
    Arc::new(Connections::new(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).expect("valid"))
}

#[test]
fn test_edgeless_graph_converges_at_generation_zero() {
    let graph = Arc::new(Connections::new(25, &[]).expect("valid"));
    for k in 1..4 {
        let config = ExperimentConfig::new(k).with_population_size(6).with_seed(k as u64);
        let result = Experiment::new(graph.clone(), config)
            .expect("valid")
            .run()
            .expect("run");
        assert_eq!(result.state, DriverState::Converged);
        assert_eq!(result.generations, 0);
        assert_eq!(result.best_fitness, 0);
    }
}

#[test]
fn test_square_two_colorable() {
    for seed in 0..5 {
        let config = ExperimentConfig::new(2)
            .with_population_size(8)
            .with_seed(seed)
            .with_max_generations(500);
        let result = Experiment::new(square(), config)
            .expect("valid")
            .run()
            .expect("run");
        assert!(result.converged(), "seed {seed} did not converge");
        let c = result.best.colors();
        assert_ne!(c[0], c[1]);
        assert_eq!(c[0], c[2]);
        assert_eq!(c[1], c[3]);
    }
}

#[test]
fn test_square_with_every_operator_combination() {
    for crossover in [CrossoverKind::Gpx, CrossoverKind::SinglePoint] {
        for strategy in [StrategyKind::VertexDescent, StrategyKind::SampledVertexDescent] {
            for clusters in [
                ClusterSelection::Greatest,
                ClusterSelection::Randomized { probability: 0.7 },
            ] {
                let config = ExperimentConfig::new(2)
                    .with_population_size(8)
                    .with_seed(99)
                    .with_max_generations(1_000)
                    .with_crossover(crossover)
                    .with_cluster_selection(clusters)
                    .with_local_search(
                        LocalSearchConfig::default()
                            .with_strategy(strategy)
                            .with_neighbor_fraction(1.0),
                    );
                let result = Experiment::new(square(), config)
                    .expect("valid")
                    .run()
                    .expect("run");
                assert!(result.converged());
            }
        }
    }
}

#[test]
fn test_myciel3_four_colors() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/myciel3.col");
    let graph = Arc::new(parse_dimacs_file(path).expect("readable graph"));
    assert_eq!(graph.size(), 11);
    assert_eq!(graph.num_edges(), 20);

    let sink = MemorySink::new();
    let config = ExperimentConfig::new(4)
        .with_population_size(20)
        .with_seed(2024)
        .with_max_generations(2_000)
        .with_history_flush_interval(10);
    let result = Experiment::with_sink(graph, config, Box::new(sink.clone()))
        .expect("valid")
        .run()
        .expect("run");
    assert!(result.converged());
    assert_eq!(result.best.conflict_count(), 0);

    let recorded: usize = sink.batches().iter().map(|b| b.len()).sum();
    assert_eq!(recorded, result.generations);
}

#[test]
fn test_bipartite_from_dimacs_text() {
    // K(3,3)
    let text = "p edge 6 9\n\
                e 1 4\ne 1 5\ne 1 6\n\
                e 2 4\ne 2 5\ne 2 6\n\
                e 3 4\ne 3 5\ne 3 6\n";
    let graph = Arc::new(parse_dimacs_str(text).expect("valid"));
    let config = ExperimentConfig::new(2)
        .with_population_size(10)
        .with_seed(8)
        .with_max_generations(500);
    let result = Experiment::new(graph, config)
        .expect("valid")
        .run()
        .expect("run");
    assert!(result.converged());
    let c = result.best.colors();
    assert!(c[..3].iter().all(|&x| x == c[0]));
    assert!(c[3..].iter().all(|&x| x == c[3]));
    assert_ne!(c[0], c[3]);
}

#[test]
fn test_triangle_needs_three_colors() {
    let graph = Arc::new(Connections::new(3, &[(0, 1), (1, 2), (2, 0)]).expect("valid"));

    let capped = ExperimentConfig::new(2)
        .with_population_size(4)
        .with_seed(1)
        .with_max_generations(20);
    let result = Experiment::new(graph.clone(), capped)
        .expect("valid")
        .run()
        .expect("run");
    assert_eq!(result.state, DriverState::GenerationLimit);
    assert_eq!(result.best_fitness, 1);

    let enough = ExperimentConfig::new(3)
        .with_population_size(4)
        .with_seed(1)
        .with_max_generations(500);
    let result = Experiment::new(graph, enough)
        .expect("valid")
        .run()
        .expect("run");
    assert!(result.converged());
}
