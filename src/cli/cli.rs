use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::application::data::LogLevel;
use crate::filesystem::ExclusionSpec;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Directory tree inspection and cleanup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// The root directory of the project, where dirkit.yaml is looked up
    #[clap(long, short, default_value = ".", global = true)]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the directories and files below a path
    Tree {
        path: PathBuf,
        #[command(flatten)]
        exclusions: ExclusionArgs,
        /// Print nothing instead of failing when the path is missing
        #[clap(long)]
        ignore_errors: bool,
    },
    /// Check that everything below a path is readable and writable
    Writable {
        path: PathBuf,
        /// Check files as well as directories
        #[clap(long)]
        include_files: bool,
        #[clap(long)]
        ignore_errors: bool,
    },
    /// Delete every file below a path, keeping the directories
    Unlink {
        path: PathBuf,
        #[command(flatten)]
        exclusions: ExclusionArgs,
        #[clap(long)]
        ignore_errors: bool,
    },
    /// Delete a directory and everything below it
    Rmdir { path: PathBuf },
    /// Print the extension of a file name or URL
    Ext { name: String },
    /// Print the permissions of a path as four digit octal
    Perms { path: PathBuf },
    /// Print a path relative to the project root
    Rtr { path: PathBuf },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ExclusionArgs {
    /// Skip entries whose name starts with a dot
    #[clap(long)]
    pub hide_dot: bool,

    /// Skip entries whose name equals or matches this pattern
    #[clap(long = "exclude", short = 'x')]
    pub exclude: Vec<String>,
}

impl ExclusionArgs {
    /// Exclusions given on the command line, or `configured` if there are none.
    pub fn to_spec(&self, configured: &ExclusionSpec) -> ExclusionSpec {
        if !self.hide_dot && self.exclude.is_empty() {
            return configured.clone();
        }

        let mut patterns = self.exclude.clone();
        if self.hide_dot {
            patterns.push(".".to_string());
        }
        ExclusionSpec::Patterns(patterns)
    }
}
