use anyhow::Result;
use inquire::Confirm;
use std::path::Path;
use treeswap_core::PaceResult;

pub fn confirm_start(dry_run: bool) -> Result<bool> {
    if !dry_run {
        println!("***WARNING: this may rename files and replace file contents!");
    }

    let proceed = Confirm::new("Continue?")
        .with_default(true)
        .prompt()?;

    Ok(proceed)
}

/// Pacing hook for `--slow`: one confirmation per directory and file.
pub fn pause_at(path: &Path, depth: usize) -> PaceResult {
    let message = format!("{}{}: continue?", "  ".repeat(depth), path.display());
    let proceed = Confirm::new(&message).with_default(true).prompt()?;
    Ok(proceed)
}
