use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::ReplaceConfig;
use crate::{Result, SweepError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameOutcome {
    DryRun,
    Renamed,
    FellBack { status: Option<i32> },
}

impl RenameOutcome {
    pub fn applied(&self) -> bool {
        !matches!(self, RenameOutcome::DryRun)
    }
}

pub trait Renamer {
    fn rename(&self, from: &Path, to: &Path) -> Result<RenameOutcome>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsRenamer;

impl Renamer for FsRenamer {
    fn rename(&self, from: &Path, to: &Path) -> Result<RenameOutcome> {
        fs_rename(from, to)?;
        Ok(RenameOutcome::Renamed)
    }
}

/// Runs `git mv`, falling back to a filesystem rename when the command fails.
#[derive(Debug, Clone)]
pub struct GitMoveRenamer {
    program: OsString,
}

impl Default for GitMoveRenamer {
    fn default() -> Self {
        Self::new()
    }
}

impl GitMoveRenamer {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self { program: program.into() }
    }

    fn run_move(&self, from: &Path, to: &Path) -> Option<i32> {
        // Both paths share a parent, so git runs there with bare names.
        let dir = match from.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let (Some(from_name), Some(to_name)) = (from.file_name(), to.file_name()) else {
            return Some(-1);
        };

        debug!("Executing 'git mv {:?} {:?}' in {:?}", from_name, to_name, dir);
        match Command::new(&self.program)
            .current_dir(dir)
            .arg("mv")
            .arg(from_name)
            .arg(to_name)
            .output()
        {
            Ok(output) if output.status.success() => None,
            Ok(output) => {
                debug!(
                    "git mv failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                Some(output.status.code().unwrap_or(-1))
            }
            Err(e) => {
                debug!("Failed to spawn {:?}: {}", self.program, e);
                Some(-1)
            }
        }
    }
}

impl Renamer for GitMoveRenamer {
    fn rename(&self, from: &Path, to: &Path) -> Result<RenameOutcome> {
        match self.run_move(from, to) {
            None => Ok(RenameOutcome::Renamed),
            Some(status) => {
                fs_rename(from, to)?;
                Ok(RenameOutcome::FellBack {
                    status: (status >= 0).then_some(status),
                })
            }
        }
    }
}

pub fn renamer_for(config: &ReplaceConfig) -> Box<dyn Renamer> {
    if config.use_git_move {
        Box::new(GitMoveRenamer::new())
    } else {
        Box::new(FsRenamer)
    }
}

pub fn rename_entry(
    renamer: &dyn Renamer,
    from: &Path,
    to: &Path,
    dry_run: bool,
) -> Result<(PathBuf, RenameOutcome)> {
    if dry_run {
        return Ok((from.to_path_buf(), RenameOutcome::DryRun));
    }
    let outcome = renamer.rename(from, to)?;
    Ok((to.to_path_buf(), outcome))
}

fn fs_rename(from: &Path, to: &Path) -> Result<()> {
    // fs::rename silently replaces an existing file on unix.
    if to.exists() {
        return Err(SweepError::Rename {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "destination already exists",
            ),
        });
    }
    fs::rename(from, to).map_err(|source| SweepError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_rename() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("old.txt");
        let to = temp.path().join("new.txt");
        fs::write(&from, "content").unwrap();

        let outcome = FsRenamer.rename(&from, &to).unwrap();

        assert_eq!(outcome, RenameOutcome::Renamed);
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "content");
    }

    #[test]
    fn test_fs_rename_existing_destination() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("old.txt");
        let to = temp.path().join("new.txt");
        fs::write(&from, "old").unwrap();
        fs::write(&to, "new").unwrap();

        let result = FsRenamer.rename(&from, &to);

        assert!(matches!(result, Err(SweepError::Rename { .. })));
        assert_eq!(fs::read_to_string(&from).unwrap(), "old");
        assert_eq!(fs::read_to_string(&to).unwrap(), "new");
    }

    #[test]
    fn test_fs_rename_missing_source() {
        let temp = TempDir::new().unwrap();

        let result = FsRenamer.rename(&temp.path().join("missing"), &temp.path().join("other"));

        assert!(matches!(result, Err(SweepError::Rename { .. })));
    }

    #[test]
    fn test_external_tool_falls_back() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("Foo");
        let to = temp.path().join("Bar");
        fs::create_dir(&from).unwrap();

        let renamer = GitMoveRenamer::with_program("treeswap-no-such-program");
        let outcome = renamer.rename(&from, &to).unwrap();

        assert_eq!(outcome, RenameOutcome::FellBack { status: None });
        assert!(!from.exists());
        assert!(to.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_external_tool_nonzero_exit_falls_back() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("a.txt");
        let to = temp.path().join("b.txt");
        fs::write(&from, "x").unwrap();

        let renamer = GitMoveRenamer::with_program("false");
        let outcome = renamer.rename(&from, &to).unwrap();

        assert_eq!(outcome, RenameOutcome::FellBack { status: Some(1) });
        assert!(to.exists());
    }

    #[test]
    fn test_rename_entry_dry_run() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("old.txt");
        let to = temp.path().join("new.txt");
        fs::write(&from, "content").unwrap();

        let (path, outcome) = rename_entry(&FsRenamer, &from, &to, true).unwrap();

        assert_eq!(path, from);
        assert_eq!(outcome, RenameOutcome::DryRun);
        assert!(!outcome.applied());
        assert!(from.exists());
        assert!(!to.exists());
    }

    #[test]
    fn test_rename_entry_returns_new_path() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("old.txt");
        let to = temp.path().join("new.txt");
        fs::write(&from, "content").unwrap();

        let (path, outcome) = rename_entry(&FsRenamer, &from, &to, false).unwrap();

        assert_eq!(path, to);
        assert!(outcome.applied());
    }
}
