use std::fmt::Write;

use anyhow::Result;
use treeswap_core::{MatchLocation, MatchStats, ReplaceConfig};

use crate::cli::Cli;

pub fn render_config(cli: &Cli, config: &ReplaceConfig) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "Verbose:\t{}", config.verbose)?;
    writeln!(output, "No Confirm:\t{}", cli.no_confirm)?;
    writeln!(output, "Dry Run:\t{}", config.dry_run)?;
    writeln!(output, "Recursive:\t{}", config.recursive)?;
    writeln!(output, "Use Git Move:\t{}", config.use_git_move)?;
    for include in &config.includes {
        writeln!(output, "Include:\t'{}'", include)?;
    }
    for exclude in &config.excludes {
        writeln!(output, "Exclude:\t'{}'", exclude)?;
    }
    for (find, replace) in config.pairs.iter() {
        writeln!(output, "Replace:\t'{}' with '{}'", find, replace)?;
    }
    for dir in &cli.dirs {
        writeln!(output, "Directory:\t'{}'", dir.display())?;
    }

    Ok(output)
}

pub fn render_report(stats: &MatchStats) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "Found files:")?;
    for (ext, count) in &stats.files_seen {
        writeln!(output, "  {}: {}x", display_ext(ext), count)?;
    }
    for location in [
        MatchLocation::Content,
        MatchLocation::DirectoryName,
        MatchLocation::FileName,
    ] {
        for (find, count) in stats.matches(location) {
            writeln!(output, "Replaced '{}' in {} {}x", find, location, count)?;
        }
    }
    writeln!(output, "Replaced inside files:")?;
    for (ext, count) in &stats.files_modified {
        writeln!(output, "  {}: {}x", display_ext(ext), count)?;
    }

    Ok(output)
}

fn display_ext(ext: &str) -> &str {
    if ext.is_empty() {
        "(none)"
    } else {
        ext
    }
}
