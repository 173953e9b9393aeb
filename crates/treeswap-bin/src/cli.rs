use clap::{ArgAction, Parser};
use std::path::PathBuf;
use treeswap_core::{FindReplacePairs, ReplaceConfig};

#[derive(Parser)]
#[command(name = "treeswap")]
#[command(version)]
#[command(about = "Find and replace across directory trees, in names and file contents")]
#[command(long_about = "Walks one or more directories, renames every directory and file whose name matches a find pattern, and replaces matches inside file contents. Find patterns are regular expressions; replacements are inserted literally.")]
pub struct Cli {
    #[arg(
        short,
        long = "replace",
        value_name = "FIND REPLACE",
        num_args = 1..,
        required = true,
        help = "Find/replace pairs, e.g. --replace findA withA findB withB"
    )]
    pub replaces: Vec<String>,

    #[arg(
        short,
        long = "dir",
        value_name = "DIR",
        num_args = 1..,
        required = true,
        help = "Directory (or directories) to process"
    )]
    pub dirs: Vec<PathBuf>,

    #[arg(
        short,
        long = "include",
        value_name = "GLOB",
        num_args = 1..,
        default_value = "*",
        help = "Only process files matching these patterns"
    )]
    pub includes: Vec<String>,

    #[arg(
        short,
        long = "exclude",
        value_name = "GLOB",
        num_args = 1..,
        help = "Skip files and directories matching these patterns; wins over --include"
    )]
    pub excludes: Vec<String>,

    #[arg(
        short = 'R',
        long,
        default_value_t = true,
        action = ArgAction::Set,
        env = "TREESWAP_RECURSIVE",
        help = "Traverse sub-directories"
    )]
    pub recursive: bool,

    #[arg(short = 'D', long, env = "TREESWAP_DRY_RUN", help = "Report what would change without changing anything")]
    pub dry_run: bool,

    #[arg(short, long, env = "TREESWAP_NO_CONFIRM", help = "Skip the confirmation prompt")]
    pub no_confirm: bool,

    #[arg(short, long, help = "Pause at every directory and file")]
    pub slow: bool,

    #[arg(short = 'g', long, env = "TREESWAP_USE_GIT_MOVE", help = "Rename with 'git mv', falling back to a plain rename")]
    pub use_git_move: bool,

    #[arg(short, long, help = "Also replace inside binary files (not recommended)")]
    pub binary: bool,

    #[arg(long, help = "Show a diff of every content change")]
    pub diff: bool,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolves the parsed arguments into the configuration the walk runs with.
    pub fn to_config(&self) -> treeswap_core::Result<ReplaceConfig> {
        let pairs = FindReplacePairs::from_flat(self.replaces.as_slice())?;

        let mut config = ReplaceConfig::new(pairs);
        config.includes = self.includes.clone();
        config.excludes = self.excludes.clone();
        config.recursive = self.recursive;
        config.dry_run = self.dry_run;
        config.verbose = self.verbose;
        config.binary = self.binary;
        config.use_git_move = self.use_git_move;
        Ok(config)
    }
}
