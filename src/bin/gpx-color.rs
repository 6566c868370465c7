use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use u_coloring::dimacs::parse_dimacs_file;
use u_coloring::ga::{
    ClusterSelection, Experiment, ExperimentConfig, HistorySink, JsonLinesSink, NullSink,
};
use u_coloring::local_search::StrategyKind;

#[derive(Clone, Copy, ValueEnum)]
enum LocalSearchArg {
    VertexDescent,
    Sampled,
}

#[derive(Parser)]
#[command(name = "gpx-color")]
#[command(about = "Search for a proper k-coloring with a memetic GA", long_about = None)]
struct Cli {
    /// DIMACS .col graph file
    #[arg(short, long)]
    input: PathBuf,

    /// Number of colors (k); overrides the config file
    #[arg(short = 'k', long)]
    colors: Option<usize>,

    /// Population size (even)
    #[arg(short, long)]
    population: Option<usize>,

    /// Root random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many generations
    #[arg(long)]
    max_generations: Option<usize>,

    /// JSON experiment config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write fitness history as JSON lines to this file
    #[arg(long, value_name = "FILE")]
    history: Option<PathBuf>,

    /// Local search strategy
    #[arg(long, value_enum)]
    local_search: Option<LocalSearchArg>,

    /// Always transplant the largest color class in crossover
    #[arg(long, default_value_t = false)]
    deterministic_clusters: bool,
}

fn build_config(cli: &Cli) -> anyhow::Result<ExperimentConfig> {
    let mut config = match (&cli.config, cli.colors) {
        (Some(path), _) => ExperimentConfig::from_json_file(path)?,
        (None, Some(k)) => ExperimentConfig::new(k),
        (None, None) => anyhow::bail!("either --colors or --config is required"),
    };

    if let Some(k) = cli.colors {
        config = config.with_colors(k);
    }
    if let Some(p) = cli.population {
        config = config.with_population_size(p);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(max) = cli.max_generations {
        config = config.with_max_generations(max);
    }
    if let Some(ls) = cli.local_search {
        let strategy = match ls {
            LocalSearchArg::VertexDescent => StrategyKind::VertexDescent,
            LocalSearchArg::Sampled => StrategyKind::SampledVertexDescent,
        };
        config.local_search = config.local_search.with_strategy(strategy);
    }
    if cli.deterministic_clusters {
        config = config.with_cluster_selection(ClusterSelection::Greatest);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    let graph = Arc::new(parse_dimacs_file(&cli.input)?);

    let sink: Box<dyn HistorySink> = match &cli.history {
        Some(path) => Box::new(JsonLinesSink::new(BufWriter::new(File::create(path)?))),
        None => Box::new(NullSink),
    };

    let colors = config.colors;
    let result = Experiment::with_sink(graph, config, sink)?.run()?;

    println!("generations: {}", result.generations);
    println!("local searches: {}", result.local_search_calls);
    println!("elapsed: {:.3?}", result.elapsed);

    if result.converged() {
        println!("proper {colors}-coloring found");
        for vertex in result.best.vertices() {
            println!("{} {}", vertex.node() + 1, vertex.color());
        }
    } else {
        println!("best: {} conflicts", result.best_fitness);
    }
    Ok(())
}
