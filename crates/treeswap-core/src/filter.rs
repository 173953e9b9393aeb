use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::events::EntryKind;
use crate::{Result, SweepError};

#[derive(Debug, Clone)]
pub struct EntryFilter {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

#[derive(Debug, Default)]
pub struct Selection {
    pub selected: Vec<PathBuf>,
    pub excluded: Vec<(PathBuf, String)>,
}

impl EntryFilter {
    pub fn new<S: AsRef<str>>(includes: &[S], excludes: &[S]) -> Result<Self> {
        Ok(Self {
            includes: compile(includes)?,
            excludes: compile(excludes)?,
        })
    }

    /// A file matched by several includes is selected once, at the position of
    /// the first include that admitted it.
    pub fn select_files(&self, dir: &Path) -> Result<Selection> {
        let files = list_entries(dir, EntryKind::File)?;

        let mut selection = Selection::default();
        let mut seen = HashSet::new();
        for include in &self.includes {
            for (path, name) in &files {
                if !include.matches(name) || !seen.insert(path.clone()) {
                    continue;
                }
                match self.excluded_by(name) {
                    Some(exclude) => selection.excluded.push((path.clone(), exclude.to_string())),
                    None => selection.selected.push(path.clone()),
                }
            }
        }

        Ok(selection)
    }

    pub fn select_dirs(&self, dir: &Path) -> Result<Selection> {
        let mut selection = Selection::default();
        for (path, name) in list_entries(dir, EntryKind::Directory)? {
            match self.excluded_by(&name) {
                Some(exclude) => selection.excluded.push((path, exclude.to_string())),
                None => selection.selected.push(path),
            }
        }

        Ok(selection)
    }

    fn excluded_by(&self, name: &str) -> Option<&str> {
        self.excludes
            .iter()
            .find(|exclude| exclude.matches(name))
            .map(Pattern::as_str)
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern.as_ref()).map_err(|source| SweepError::InvalidGlob {
                pattern: pattern.as_ref().to_string(),
                source,
            })
        })
        .collect()
}

// Symlinks are followed: a link to a file outside the tree is processed like
// any other file.
fn list_entries(dir: &Path, kind: EntryKind) -> Result<Vec<(PathBuf, String)>> {
    let io_error = |source| SweepError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let wanted = match kind {
            EntryKind::File => path.is_file(),
            EntryKind::Directory => path.is_dir(),
        };
        if !wanted {
            continue;
        }
        if let Some(name) = path.file_name() {
            let name = name.to_string_lossy().into_owned();
            entries.push((path, name));
        }
    }

    entries.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(entries)
}
