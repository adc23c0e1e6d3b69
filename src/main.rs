use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Env;

use universe_generator::config::Settings;
use universe_generator::naming::{load_chains, MarkovChains};
use universe_generator::seeds::UniverseSeeds;
use universe_generator::universe::{export_json, write_dot_file, MemoryStore, Universe};

#[derive(Parser, Debug)]
#[command(name = "universe_generator")]
#[command(about = "Generate a random universe of named places linked by non-crossing wormholes")]
struct Args {
    /// TOML config file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "universe.toml")]
    config: PathBuf,

    /// Name corpus, one word per line (reads stdin if not specified)
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seed for place names only, keeping the layout of --seed
    #[arg(long)]
    names_seed: Option<u64>,

    /// Seed for the layout only, keeping the names of --seed
    #[arg(long)]
    layout_seed: Option<u64>,

    /// Graphviz output path
    #[arg(long, default_value = "universe.gv")]
    dot: PathBuf,

    /// Also export places and wormholes as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();

    if let Err(err) = run(&args) {
        log::error!("{}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let settings = Settings::load(&args.config)?;
    let config = &settings.universe;

    let chains = read_chains(args.corpus.as_ref(), config.markov_prefix_length)?;
    log::info!(
        "trained name chains on {} start prefixes",
        chains.start_prefixes().len()
    );

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut builder = UniverseSeeds::builder(seed);
    if let Some(names) = args.names_seed {
        builder = builder.names(names);
    }
    if let Some(layout) = args.layout_seed {
        builder = builder.layout(layout);
    }
    let seeds = builder.build();
    log::info!("generating universe with {}", seeds);

    let mut store = MemoryStore::new();
    let universe = store.transaction(|tx| Universe::generate(config, &chains, tx, &seeds))?;
    if let Some((place, degree)) = store.busiest_place() {
        log::info!("busiest place: {} ({}, {}) with {} wormholes", place.name, place.x, place.y, degree);
    }

    write_dot_file(&universe, settings.export.dot_scale, &args.dot)?;
    if let Some(path) = &args.json {
        export_json(&universe, Some(seed), path)?;
    }

    let summary = universe.summary();
    println!(
        "seed {}: {} places, {} wormholes, {} sub-regions -> {}",
        seed,
        summary.places,
        summary.wormholes,
        summary.regions,
        args.dot.display()
    );
    Ok(())
}

fn read_chains(corpus: Option<&PathBuf>, prefix_length: usize) -> Result<MarkovChains, Box<dyn Error>> {
    let chains = match corpus {
        Some(path) => {
            log::info!("reading corpus {}", path.display());
            load_chains(BufReader::new(File::open(path)?), prefix_length)?
        }
        None => {
            log::info!("reading corpus from stdin");
            load_chains(io::stdin().lock(), prefix_length)?
        }
    };
    Ok(chains)
}
