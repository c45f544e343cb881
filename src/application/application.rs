use std::io::Write;
use std::path::PathBuf;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::debug;

use crate::application::RuntimeConfig;
use crate::application::output::Output;
use crate::cli::Command;
use crate::config::{ConfigCreationError, ProjectConfig};
use crate::ext::BestEffortPathExt;
use crate::filesystem::{
    FilesystemError, dir_tree, is_writable_recursive, rmdir_recursive, unlink_recursive,
};
use crate::helpers::rtr;
use crate::path::{extension_of, file_perms};

pub struct Application;

impl Application {
    pub fn run(runtime_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        Self::run_with_output(runtime_config, &mut Output::stdout())
    }

    pub fn run_with_output<W: Write>(
        runtime_config: impl Into<RuntimeConfig>,
        output: &mut Output<W>,
    ) -> Result<(), ApplicationError> {
        let runtime_config: RuntimeConfig = runtime_config.into();
        let config = ProjectConfig::read(&runtime_config.root).context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", config);

        match runtime_config.command {
            Command::Tree {
                path,
                exclusions,
                ignore_errors,
            } => {
                let tree = dir_tree(&path, exclusions.to_spec(config.exclusions()), ignore_errors)
                    .context(FilesystemSnafu)?;
                output.tree(&tree).context(OutputSnafu)?;
            }
            Command::Writable {
                path,
                include_files,
                ignore_errors,
            } => {
                let writable = is_writable_recursive(&path, !include_files, ignore_errors)
                    .context(FilesystemSnafu)?;
                output.flag(writable).context(OutputSnafu)?;
            }
            Command::Unlink {
                path,
                exclusions,
                ignore_errors,
            } => {
                let unlinked = unlink_recursive(
                    &path,
                    exclusions.to_spec(config.exclusions()),
                    ignore_errors,
                )
                .context(FilesystemSnafu)?;
                output.flag(unlinked).context(OutputSnafu)?;
            }
            Command::Rmdir { path } => {
                let removed = rmdir_recursive(&path).context(FilesystemSnafu)?;
                output.flag(removed).context(OutputSnafu)?;
            }
            Command::Ext { name } => {
                if let Some(extension) = extension_of(&name) {
                    output.line(extension).context(OutputSnafu)?;
                }
            }
            Command::Perms { path } => {
                let perms = file_perms(&path).context(PermsSnafu { path })?;
                output.line(perms).context(OutputSnafu)?;
            }
            Command::Rtr { path } => {
                output
                    .line(rtr(&path, &config).display())
                    .context(OutputSnafu)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ConfigCreationError },
    #[snafu(display("Filesystem operation failed"))]
    FilesystemError { source: FilesystemError },
    #[snafu(display("Failed to read permissions of {}", path.best_effort_path_display()))]
    PermsError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to write output"))]
    OutputError { source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ExclusionArgs;
    use std::fs;
    use tempfile::TempDir;

    fn run(root: &TempDir, command: Command) -> Result<String, ApplicationError> {
        let mut output = Output::new(Vec::new(), false);
        Application::run_with_output(
            RuntimeConfig {
                command,
                root: root.path().to_path_buf(),
            },
            &mut output,
        )?;
        Ok(String::from_utf8(output.into_inner()).unwrap())
    }

    #[test]
    fn test_tree_command_uses_configured_exclusions() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("dirkit.yaml"), "exclusions: ['.']").unwrap();
        fs::write(temp_dir.path().join("visible.txt"), "x").unwrap();
        fs::write(temp_dir.path().join(".secret"), "x").unwrap();

        let printed = run(
            &temp_dir,
            Command::Tree {
                path: temp_dir.path().to_path_buf(),
                exclusions: ExclusionArgs::default(),
                ignore_errors: false,
            },
        )
        .unwrap();

        let expected = format!(
            "{}\n{}\n{}\n",
            temp_dir.path().display(),
            temp_dir.path().join("dirkit.yaml").display(),
            temp_dir.path().join("visible.txt").display()
        );
        assert_eq!(printed, expected);
    }

    #[test]
    fn test_tree_command_on_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = run(
            &temp_dir,
            Command::Tree {
                path: temp_dir.path().join("missing"),
                exclusions: ExclusionArgs::default(),
                ignore_errors: false,
            },
        );
        assert!(matches!(
            result,
            Err(ApplicationError::FilesystemError {
                source: FilesystemError::DirectoryNotFound { .. }
            })
        ));
    }

    #[test]
    fn test_rmdir_and_ext_commands() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("build");
        fs::create_dir_all(target.join("out")).unwrap();

        let printed = run(&temp_dir, Command::Rmdir { path: target.clone() }).unwrap();
        assert_eq!(printed, "true\n");
        assert!(!target.exists());

        let printed = run(
            &temp_dir,
            Command::Ext {
                name: "dump.SQL.gz".into(),
            },
        )
        .unwrap();
        assert_eq!(printed, "sql.gz\n");
    }

    #[test]
    fn test_config_error_is_reported() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("dirkit.yaml"), "- not a map").unwrap();

        let result = run(&temp_dir, Command::Ext { name: "a.txt".into() });
        assert!(matches!(result, Err(ApplicationError::ConfigError { .. })));
    }
}
