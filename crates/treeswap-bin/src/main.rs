mod cli;
mod diff;
mod prompt;
mod report;
mod sink;

use anyhow::Result;
use cli::Cli;
use sink::ConsoleSink;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use treeswap_core::Walker;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    setup_logging(&cli)?;

    info!("Starting treeswap");

    let config = cli.to_config()?;

    for dir in &cli.dirs {
        if !dir.exists() {
            anyhow::bail!("Target directory does not exist: {:?}", dir);
        }
        if !dir.is_dir() {
            anyhow::bail!("Target must be a directory: {:?}", dir);
        }
    }

    print!("{}", report::render_config(&cli, &config)?);

    if config.dry_run {
        warn!("Dry run mode - no changes will be made");
    }

    if !cli.no_confirm && !prompt::confirm_start(config.dry_run)? {
        info!("Aborted, nothing was changed");
        return Ok(());
    }

    let mut walker = Walker::new(&config)?.with_sink(ConsoleSink::new(cli.diff));
    if cli.slow {
        walker = walker.with_pacer(prompt::pause_at);
    }

    let mut stats = treeswap_core::MatchStats::new();
    for dir in &cli.dirs {
        if !cli.verbose {
            println!("Dir {}...", dir.display());
        }
        // One root at a time so the progress line precedes its output.
        let root_stats = walker.walk(std::slice::from_ref(dir))?;
        stats.merge(root_stats);
    }

    println!();
    print!("{}", report::render_report(&stats)?);

    info!("Treeswap completed successfully");
    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact()
        )
        .with(filter)
        .init();

    Ok(())
}
