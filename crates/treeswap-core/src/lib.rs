use std::path::{Path, PathBuf};

use tracing::info;

pub mod binary;
pub mod config;
pub mod events;
pub mod filter;
mod processor;
pub mod renamer;
pub mod replacer;
pub mod stats;
pub mod walker;

pub use binary::BinaryReason;
pub use config::{FindReplacePairs, ReplaceConfig};
pub use events::{EntryKind, EventSink, RecordedEvent, TracingSink, WalkEvent};
pub use renamer::{FsRenamer, GitMoveRenamer, RenameOutcome, Renamer};
pub use replacer::{PatternReplacer, Replacement};
pub use stats::{MatchLocation, MatchStats};
pub use walker::{PaceResult, Walker};

#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    #[error("Invalid find pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Invalid glob '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("Not a directory: {path:?}")]
    NotADirectory { path: PathBuf },
    #[error("Failed to rename {from:?} to {to:?}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Replacement turns {path:?} into invalid name '{name}'")]
    InvalidName { path: PathBuf, name: String },
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Walk aborted at {path:?}")]
    Aborted { path: PathBuf },
    #[error("Pacing hook failed: {source}")]
    Pacing {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SweepError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            SweepError::Configuration { .. }
                | SweepError::InvalidPattern { .. }
                | SweepError::InvalidGlob { .. }
                | SweepError::NotADirectory { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;

pub fn replace_in_directories<P: AsRef<Path>>(
    roots: &[P],
    config: &ReplaceConfig,
) -> Result<MatchStats> {
    info!("Starting find/replace over {} root(s)", roots.len());

    let stats = Walker::new(config)?.walk(roots)?;

    info!(
        "Processing complete: {} files seen, {} files modified",
        stats.total_files_seen(),
        stats.total_files_modified()
    );

    Ok(stats)
}
