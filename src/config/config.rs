use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    borrow::Cow,
    env,
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{ext::BestEffortPathExt, filesystem::ExclusionSpec};

const CONFIG_FILE_NAME: &str = "dirkit.yaml";
const PROJECT_ROOT_ENV: &str = "DIRKIT_PROJECT_ROOT";

fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

fn key<'a>(name: &'static str) -> Yaml<'a> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

/// Project level settings: the root that `rtr` relativizes against and the
/// exclusions applied when none are given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    project_root: PathBuf,
    exclusions: ExclusionSpec,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::with_project_root(".")
    }
}

impl ProjectConfig {
    pub fn with_project_root(project_root: impl Into<PathBuf>) -> Self {
        ProjectConfig {
            project_root: project_root.into(),
            exclusions: ExclusionSpec::None,
        }
    }

    /// Reads `dirkit.yaml` from `root`, falling back to defaults rooted at
    /// `root` when the file does not exist. `DIRKIT_PROJECT_ROOT` overrides
    /// the project root either way.
    pub fn read(root: &Path) -> Result<Self, ConfigCreationError> {
        let path = get_config_file_path(root);
        let config = if path.is_file() {
            Self::from_path(&path)?
        } else {
            debug!(
                "No config file at {}, using defaults",
                path.best_effort_path_display()
            );
            Self::with_project_root(root)
        };

        Ok(config.with_project_root_override(env::var_os(PROJECT_ROOT_ENV)))
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigCreationError> {
        debug!("Reading config file: {}", path.best_effort_path_display());
        let contents = fs::read_to_string(path).context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        let mut config = Self::try_from(contents.as_str())?;

        let base_dir = path.parent().unwrap_or(Path::new("."));
        if config.project_root.is_relative() {
            config.project_root = base_dir.join(&config.project_root);
        }
        Ok(config)
    }

    pub fn with_project_root_override(mut self, value: Option<OsString>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            debug!("Project root overridden by {}: {:?}", PROJECT_ROOT_ENV, value);
            self.project_root = PathBuf::from(value);
        }
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn exclusions(&self) -> &ExclusionSpec {
        &self.exclusions
    }

    fn parse_exclusions(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<ExclusionSpec, ConfigCreationError> {
        let Some(value) = top_level.get(&key("exclusions")) else {
            return Ok(ExclusionSpec::None);
        };

        match value {
            Yaml::Value(Scalar::Boolean(hide_dot_entries)) => Ok((*hide_dot_entries).into()),
            Yaml::Value(Scalar::Null) => Ok(ExclusionSpec::None),
            _ => {
                let patterns = value
                    .as_sequence()
                    .ok_or(ConfigCreationError::ExclusionsInvalid)?
                    .iter()
                    .map(|item| item.as_str().map(|s| s.to_string()))
                    .collect::<Option<Vec<_>>>()
                    .ok_or(ConfigCreationError::ExclusionsInvalid)?;
                Ok(ExclusionSpec::Patterns(patterns))
            }
        }
    }
}

impl TryFrom<&str> for ProjectConfig {
    type Error = ConfigCreationError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let contents_vec = Yaml::load_from_str(contents)
            .map_err(|e| ConfigCreationError::ParseError { source: e })?;
        let contents = contents_vec
            .first()
            .ok_or(ConfigCreationError::MalformedConfig)?;

        let top_level = contents
            .as_mapping()
            .ok_or(ConfigCreationError::TopLevelNotMap)?;

        let project_root = match top_level.get(&key("project_root")) {
            None => PathBuf::from("."),
            Some(value) => value
                .as_str()
                .map(PathBuf::from)
                .ok_or(ConfigCreationError::ProjectRootNotString)?,
        };
        let exclusions = Self::parse_exclusions(top_level)?;

        Ok(ProjectConfig {
            project_root,
            exclusions,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigCreationError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfig,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("project_root should be a string"))]
    ProjectRootNotString,
    #[snafu(display("exclusions should be a boolean or a list of strings"))]
    ExclusionsInvalid,
}
