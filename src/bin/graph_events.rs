//! graph_events - synthesize random sensing events for a graph

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use qr_sensing::graph::{synthesize, write_events_json, EventOptions, Graph};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GraphKind {
    Complete,
    Path,
    Triangular,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Synthesize random timestamped sensing events per node")]
struct Args {
    /// Precomputed graph as a JSON adjacency file. Overrides --kind.
    #[arg(long)]
    graph: Option<PathBuf>,
    /// Graph shape to build when no file is given.
    #[arg(long, value_enum, default_value_t = GraphKind::Triangular)]
    kind: GraphKind,
    /// Node count for complete/path graphs.
    #[arg(long, default_value_t = 10)]
    nodes: usize,
    /// Grid rows for the triangular lattice.
    #[arg(long, default_value_t = 5)]
    rows: usize,
    /// Grid columns for the triangular lattice.
    #[arg(long, default_value_t = 5)]
    cols: usize,
    /// Events generated per node/neighbor pair.
    #[arg(long, default_value_t = 50)]
    events_per_pair: usize,
    /// Window width between consecutive events of one pair, in seconds.
    #[arg(long, default_value_t = 10.0)]
    spacing: f64,
    /// RNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Output file path for the event artifact.
    #[arg(long, default_value = "events.json")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.events_per_pair == 0 {
        return Err(anyhow!("--events-per-pair must be greater than zero"));
    }
    if !args.spacing.is_finite() || args.spacing <= 0.0 {
        return Err(anyhow!("--spacing must be a positive number of seconds"));
    }

    let graph = match &args.graph {
        Some(path) => Graph::load(path)?,
        None => match args.kind {
            GraphKind::Complete => Graph::complete(args.nodes),
            GraphKind::Path => Graph::path(args.nodes),
            GraphKind::Triangular => Graph::triangular_lattice(args.rows, args.cols),
        },
    };
    log::info!(
        "graph loaded: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let options = EventOptions {
        events_per_pair: args.events_per_pair,
        spacing: args.spacing,
    };

    let events = match args.seed {
        Some(seed) => synthesize(&mut StdRng::seed_from_u64(seed), &graph, &options),
        None => synthesize(&mut rand::thread_rng(), &graph, &options),
    };

    write_events_json(&args.output, &events)?;
    println!("events written to {}", args.output.display());
    Ok(())
}
