use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use snafu::Snafu;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::ext::BestEffortPathExt;

use super::exclusion::{CompiledExclusion, ExclusionSpec};

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Directories and files found below a root, in their reporting order.
///
/// `directories` starts with the root and is sorted by full path. `files` is
/// grouped by parent directory in the same order, each group sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeResult {
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
}

/// Recursively lists the directories and files below `root`.
///
/// Excluded directories are pruned before descent, so nothing below them is
/// ever visited. Subdirectories that cannot be read are skipped. A missing
/// `root` is an error unless `ignore_errors` is set, in which case the result
/// is empty.
pub fn dir_tree(
    root: impl AsRef<Path>,
    exclusions: impl Into<ExclusionSpec>,
    ignore_errors: bool,
) -> Result<TreeResult, FilesystemError> {
    let root = normalize_root(root.as_ref());

    if !root.is_dir() {
        if ignore_errors {
            warn!(
                "Directory {} not found, returning an empty tree",
                root.best_effort_path_display()
            );
            return Ok(TreeResult::default());
        }
        return DirectoryNotFoundSnafu { path: root }.fail();
    }

    let exclusion = CompiledExclusion::compile(&exclusions.into());
    debug!(
        "Walking {} with exclusions {:?}",
        root.best_effort_path_display(),
        exclusion
    );

    Ok(walk(&root, &exclusion))
}

fn walk(root: &Path, exclusion: &CompiledExclusion) -> TreeResult {
    let mut directories = Vec::new();
    let mut files = Vec::new();

    let entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !exclusion.is_excluded(&entry.file_name().to_string_lossy())
        });

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.depth() == 0 {
            directories.push(root.to_path_buf());
        } else if entry.file_type().is_dir() {
            directories.push(entry.into_path());
        } else {
            files.push(entry.into_path());
        }
    }

    directories.sort_by(|a, b| {
        a.as_os_str()
            .as_encoded_bytes()
            .cmp(b.as_os_str().as_encoded_bytes())
    });

    let directory_order: HashMap<&Path, usize> = directories
        .iter()
        .enumerate()
        .map(|(index, dir)| (dir.as_path(), index))
        .collect();
    files.sort_by_cached_key(|file| {
        let parent_index = file
            .parent()
            .and_then(|parent| directory_order.get(parent).copied())
            .unwrap_or(usize::MAX);
        (parent_index, file.file_name().map(|name| name.to_os_string()))
    });

    debug!(
        "Found {} directories and {} files below {}",
        directories.len(),
        files.len(),
        root.display()
    );

    TreeResult { directories, files }
}

/// Strips trailing separators, keeping a root made only of separators as is.
/// A drive root keeps one separator, since a bare `C:` is drive-relative.
fn normalize_root(path: &Path) -> PathBuf {
    let Some(raw) = path.to_str() else {
        return path.to_path_buf();
    };

    let trimmed = raw.trim_end_matches(SEPARATORS);
    if trimmed.is_empty() {
        return path.to_path_buf();
    }
    if trimmed.len() < raw.len()
        && matches!(
            Path::new(trimmed).components().next_back(),
            Some(Component::Prefix(_))
        )
    {
        return PathBuf::from(&raw[..=trimmed.len()]);
    }

    PathBuf::from(trimmed)
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FilesystemError {
    #[snafu(display("Directory not found: {}", path.best_effort_path_display()))]
    DirectoryNotFound { path: PathBuf },
    #[snafu(display("Failed to {} {}", operation, path.best_effort_path_display()))]
    IoError {
        operation: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
}
