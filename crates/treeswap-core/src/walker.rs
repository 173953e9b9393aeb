use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ReplaceConfig;
use crate::events::{EntryKind, EventSink, TracingSink, WalkEvent};
use crate::filter::{EntryFilter, Selection};
use crate::processor;
use crate::renamer::{rename_entry, renamer_for, RenameOutcome, Renamer};
use crate::replacer::PatternReplacer;
use crate::stats::{MatchLocation, MatchStats};
use crate::{Result, SweepError};

/// What a pacing hook returns: `Ok(true)` to continue, `Ok(false)` to abort the walk.
pub type PaceResult = std::result::Result<bool, Box<dyn std::error::Error + Send + Sync>>;

type Pacer<'a> = Box<dyn FnMut(&Path, usize) -> PaceResult + 'a>;

/// Depth-first find/replace walk over one or more directory trees.
///
/// Each directory is renamed first, then its files are processed, then its
/// subdirectories are visited under the directory's new path.
pub struct Walker<'a> {
    filter: EntryFilter,
    context: WalkContext<'a>,
}

pub(crate) struct WalkContext<'a> {
    pub(crate) config: &'a ReplaceConfig,
    pub(crate) replacer: PatternReplacer,
    pub(crate) renamer: Box<dyn Renamer + 'a>,
    pub(crate) sink: Box<dyn EventSink + 'a>,
    pub(crate) pacer: Option<Pacer<'a>>,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a ReplaceConfig) -> Result<Self> {
        let replacer = PatternReplacer::new(&config.pairs)?;
        let filter = EntryFilter::new(config.includes.as_slice(), config.excludes.as_slice())?;

        Ok(Self {
            filter,
            context: WalkContext {
                config,
                replacer,
                renamer: renamer_for(config),
                sink: Box::new(TracingSink),
                pacer: None,
            },
        })
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'a) -> Self {
        self.context.sink = Box::new(sink);
        self
    }

    pub fn with_renamer(mut self, renamer: impl Renamer + 'a) -> Self {
        self.context.renamer = Box::new(renamer);
        self
    }

    pub fn with_pacer<F>(mut self, pacer: F) -> Self
    where
        F: FnMut(&Path, usize) -> PaceResult + 'a,
    {
        self.context.pacer = Some(Box::new(pacer));
        self
    }

    pub fn walk<P: AsRef<Path>>(&mut self, roots: &[P]) -> Result<MatchStats> {
        for root in roots {
            let root = root.as_ref();
            if !root.is_dir() {
                return Err(SweepError::NotADirectory {
                    path: root.to_path_buf(),
                });
            }
        }

        let mut stats = MatchStats::new();
        for root in roots {
            self.visit_directory(root.as_ref(), 0, &mut stats)?;
        }

        self.context.sink.emit(&WalkEvent::WalkCompleted { stats: &stats });
        Ok(stats)
    }

    fn visit_directory(&mut self, dir: &Path, depth: usize, stats: &mut MatchStats) -> Result<()> {
        self.context.sink.emit(&WalkEvent::DirectoryEntered { path: dir, depth });
        self.context.pace(dir, depth)?;

        let dir = self.context.rename_matched(dir, EntryKind::Directory, stats)?;

        let files = self.filter.select_files(&dir)?;
        self.context.report_excluded(EntryKind::File, &files);
        for file in &files.selected {
            processor::process_file(&mut self.context, file, depth, stats)?;
        }

        if self.context.config.recursive {
            let subdirs = self.filter.select_dirs(&dir)?;
            self.context.report_excluded(EntryKind::Directory, &subdirs);
            for subdir in &subdirs.selected {
                self.visit_directory(subdir, depth + 1, stats)?;
            }
        }

        Ok(())
    }
}

impl WalkContext<'_> {
    pub(crate) fn pace(&mut self, path: &Path, depth: usize) -> Result<()> {
        let Some(pacer) = self.pacer.as_mut() else {
            return Ok(());
        };
        match pacer(path, depth) {
            Ok(true) => Ok(()),
            Ok(false) => Err(SweepError::Aborted {
                path: path.to_path_buf(),
            }),
            Err(source) => Err(SweepError::Pacing { source }),
        }
    }

    pub(crate) fn rename_matched(
        &mut self,
        path: &Path,
        kind: EntryKind,
        stats: &mut MatchStats,
    ) -> Result<PathBuf> {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            debug!("Skipping rename check for {:?}", path);
            return Ok(path.to_path_buf());
        };

        let replacement = self.replacer.apply(name);
        if replacement.text == name {
            return Ok(path.to_path_buf());
        }

        if replacement.text.is_empty()
            || replacement.text.contains(std::path::is_separator)
            || replacement.text == "."
            || replacement.text == ".."
        {
            return Err(SweepError::InvalidName {
                path: path.to_path_buf(),
                name: replacement.text,
            });
        }

        let location = match kind {
            EntryKind::Directory => MatchLocation::DirectoryName,
            EntryKind::File => MatchLocation::FileName,
        };
        for (pattern, count) in &replacement.counts {
            stats.record_matches(location, pattern, *count);
            self.sink.emit(&WalkEvent::PatternMatched {
                pattern,
                location,
                count: *count,
            });
        }

        let target = path.with_file_name(&replacement.text);
        let (new_path, outcome) =
            rename_entry(self.renamer.as_ref(), path, &target, self.config.dry_run)?;

        if let RenameOutcome::FellBack { status } = outcome {
            self.sink.emit(&WalkEvent::ExternalToolFailed {
                from: path,
                to: &target,
                status,
            });
        }
        self.sink.emit(&WalkEvent::EntryRenamed {
            kind,
            from: path,
            to: &target,
            dry_run: !outcome.applied(),
        });

        Ok(new_path)
    }

    fn report_excluded(&mut self, kind: EntryKind, selection: &Selection) {
        for (path, pattern) in &selection.excluded {
            self.sink.emit(&WalkEvent::EntryExcluded { kind, path, pattern });
        }
    }
}
