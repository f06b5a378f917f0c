use clap::Parser;
use log::{error, info, warn};
use simple_logger::init_with_level;

mod cli;

use cli::Args;

fn main() {
    let start = std::time::Instant::now();

    let args = Args::parse();

    if let Err(err) = init_with_level(args.level) {
        eprintln!("could not initialize logging: {err}");
    }
    if let Err(err) = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.max(1))
        .build_global()
    {
        warn!("could not configure thread pool: {err}");
    }

    let config = match args.into_config() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    match sufmap_core::run(&config) {
        Ok(summary) => info!(
            "{} references, {} queries, {} hits, {} skipped records (index {})",
            summary.num_references,
            summary.stats.queries,
            summary.stats.hits,
            summary.stats.skipped,
            if summary.index_built { "built" } else { "loaded" }
        ),
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }

    let elapsed = start.elapsed();
    info!("Elapsed time: {:.3?}", elapsed);
}
