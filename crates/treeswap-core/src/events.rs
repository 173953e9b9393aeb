use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::binary::BinaryReason;
use crate::stats::{MatchLocation, MatchStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "directory"),
            EntryKind::File => write!(f, "file"),
        }
    }
}

/// Something that happened during a walk. Borrowed data is only valid for the
/// duration of the `emit` call.
#[derive(Debug, Clone, Copy)]
pub enum WalkEvent<'a> {
    DirectoryEntered {
        path: &'a Path,
        depth: usize,
    },
    EntryRenamed {
        kind: EntryKind,
        from: &'a Path,
        to: &'a Path,
        dry_run: bool,
    },
    EntryExcluded {
        kind: EntryKind,
        path: &'a Path,
        pattern: &'a str,
    },
    FileDiscovered {
        path: &'a Path,
    },
    PatternMatched {
        pattern: &'a str,
        location: MatchLocation,
        count: usize,
    },
    BinarySkipped {
        path: &'a Path,
        reason: BinaryReason,
    },
    ContentReplaced {
        path: &'a Path,
        total_matches: usize,
        original: &'a str,
        replaced: &'a str,
        dry_run: bool,
    },
    ExternalToolFailed {
        from: &'a Path,
        to: &'a Path,
        status: Option<i32>,
    },
    WalkCompleted {
        stats: &'a MatchStats,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: &WalkEvent<'_>);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&mut self, event: &WalkEvent<'_>) {
        match *event {
            WalkEvent::DirectoryEntered { path, depth } => {
                debug!("Dir {:?} (depth {})", path, depth);
            }
            WalkEvent::EntryRenamed { kind, from, to, dry_run } => {
                let from = file_name(from);
                let to = file_name(to);
                if dry_run {
                    info!("Would rename {} from '{}' to '{}'", kind, from, to);
                } else {
                    info!("Renaming {} from '{}' to '{}'", kind, from, to);
                }
            }
            WalkEvent::EntryExcluded { kind, path, pattern } => {
                debug!("Excluded {} {:?} due to '{}'", kind, path, pattern);
            }
            WalkEvent::FileDiscovered { path } => {
                debug!("Found file {:?}", path);
            }
            WalkEvent::PatternMatched { pattern, location, count } => {
                debug!("Found '{}' in {} {}x", pattern, location, count);
            }
            WalkEvent::BinarySkipped { path, reason } => {
                debug!("Skipping binary file {:?}: {}", path, reason);
            }
            WalkEvent::ContentReplaced { path, total_matches, dry_run, .. } => {
                if dry_run {
                    info!("Would update {}: {}x", path.display(), total_matches);
                } else {
                    info!("{}: {}x", path.display(), total_matches);
                }
            }
            WalkEvent::ExternalToolFailed { from, to, status } => match status {
                Some(code) => warn!(
                    "git mv {:?} {:?} failed with exit code {}, falling back to rename",
                    from, to, code
                ),
                None => warn!(
                    "git mv {:?} {:?} could not be run, falling back to rename",
                    from, to
                ),
            },
            WalkEvent::WalkCompleted { stats } => {
                debug!(
                    "Walk complete: {} files seen, {} files modified",
                    stats.total_files_seen(),
                    stats.total_files_modified()
                );
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    DirectoryEntered(PathBuf),
    EntryRenamed { kind: EntryKind, from: PathBuf, to: PathBuf },
    EntryExcluded { kind: EntryKind, path: PathBuf },
    FileDiscovered(PathBuf),
    PatternMatched { pattern: String, location: MatchLocation, count: usize },
    BinarySkipped { path: PathBuf, reason: BinaryReason },
    ContentReplaced { path: PathBuf, total_matches: usize },
    ExternalToolFailed { from: PathBuf, to: PathBuf },
    WalkCompleted(MatchStats),
}

impl From<&WalkEvent<'_>> for RecordedEvent {
    fn from(event: &WalkEvent<'_>) -> Self {
        match *event {
            WalkEvent::DirectoryEntered { path, .. } => Self::DirectoryEntered(path.to_path_buf()),
            WalkEvent::EntryRenamed { kind, from, to, .. } => Self::EntryRenamed {
                kind,
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            },
            WalkEvent::EntryExcluded { kind, path, .. } => Self::EntryExcluded {
                kind,
                path: path.to_path_buf(),
            },
            WalkEvent::FileDiscovered { path } => Self::FileDiscovered(path.to_path_buf()),
            WalkEvent::PatternMatched { pattern, location, count } => Self::PatternMatched {
                pattern: pattern.to_string(),
                location,
                count,
            },
            WalkEvent::BinarySkipped { path, reason } => Self::BinarySkipped {
                path: path.to_path_buf(),
                reason,
            },
            WalkEvent::ContentReplaced { path, total_matches, .. } => Self::ContentReplaced {
                path: path.to_path_buf(),
                total_matches,
            },
            WalkEvent::ExternalToolFailed { from, to, .. } => Self::ExternalToolFailed {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
            },
            WalkEvent::WalkCompleted { stats } => Self::WalkCompleted(stats.clone()),
        }
    }
}

impl EventSink for Vec<RecordedEvent> {
    fn emit(&mut self, event: &WalkEvent<'_>) {
        self.push(event.into());
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: &WalkEvent<'_>) {
        (**self).emit(event);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
