use std::path::{Path, PathBuf};

use crate::filesystem::{ExclusionSpec, TreeResult, dir_tree};
use crate::path::{Perms, file_perms, perms_to_string};

#[track_caller]
fn tree_of(dir: &Path, exclusions: impl Into<ExclusionSpec>) -> TreeResult {
    match dir_tree(dir, exclusions, false) {
        Ok(tree) => tree,
        Err(e) => panic!("Failed to list directory {}: {}", dir.display(), e),
    }
}

#[track_caller]
pub fn assert_directory_empty(dir: impl AsRef<Path>) {
    let dir = dir.as_ref();
    let tree = tree_of(dir, ExclusionSpec::None);
    assert!(
        tree.directories.len() == 1 && tree.files.is_empty(),
        "Expected directory {} to be empty, found {:?}",
        dir.display(),
        tree
    );
}

#[track_caller]
pub fn assert_directory_not_empty(dir: impl AsRef<Path>) {
    let dir = dir.as_ref();
    let tree = tree_of(dir, ExclusionSpec::None);
    assert!(
        tree.directories.len() > 1 || !tree.files.is_empty(),
        "Expected directory {} not to be empty",
        dir.display()
    );
}

/// Counts every file below `dir`, dot-files included.
#[track_caller]
pub fn assert_files_count(dir: impl AsRef<Path>, expected: usize) {
    let dir = dir.as_ref();
    let files = tree_of(dir, ExclusionSpec::None).files;
    assert_eq!(
        files.len(),
        expected,
        "Unexpected number of files below {}: {:?}",
        dir.display(),
        files
    );
}

#[track_caller]
pub fn assert_not_files_count(dir: impl AsRef<Path>, unexpected: usize) {
    let dir = dir.as_ref();
    let files = tree_of(dir, ExclusionSpec::None).files;
    assert_ne!(
        files.len(),
        unexpected,
        "Expected the number of files below {} to differ from {}",
        dir.display(),
        unexpected
    );
}

/// Compares a walk of `root` against paths relative to it, in order.
/// An empty string stands for `root` itself.
#[track_caller]
pub fn assert_dir_tree_eq(
    root: impl AsRef<Path>,
    exclusions: impl Into<ExclusionSpec>,
    expected_directories: &[&str],
    expected_files: &[&str],
) {
    let root = root.as_ref();
    let resolve = |relative: &&str| -> PathBuf {
        if relative.is_empty() {
            root.to_path_buf()
        } else {
            root.join(relative)
        }
    };

    let tree = tree_of(root, exclusions);
    let expected = TreeResult {
        directories: expected_directories.iter().map(&resolve).collect(),
        files: expected_files.iter().map(&resolve).collect(),
    };
    assert_eq!(tree, expected, "Unexpected tree below {}", root.display());
}

#[track_caller]
pub fn assert_file_permissions(path: impl AsRef<Path>, expected: impl Into<Perms>) {
    let path = path.as_ref();
    let actual = match file_perms(path) {
        Ok(perms) => perms,
        Err(e) => panic!("Failed to read permissions of {}: {}", path.display(), e),
    };
    assert_eq!(
        actual,
        perms_to_string(expected),
        "Unexpected permissions on {}",
        path.display()
    );
}

#[track_caller]
pub fn assert_file_exists(path: impl AsRef<Path>) {
    let path = path.as_ref();
    assert!(path.is_file(), "Expected file {} to exist", path.display());
}

#[track_caller]
pub fn assert_file_not_exists(path: impl AsRef<Path>) {
    let path = path.as_ref();
    assert!(!path.exists(), "Expected file {} not to exist", path.display());
}

#[track_caller]
pub fn assert_dir_exists(path: impl AsRef<Path>) {
    let path = path.as_ref();
    assert!(path.is_dir(), "Expected directory {} to exist", path.display());
}

#[track_caller]
pub fn assert_dir_not_exists(path: impl AsRef<Path>) {
    let path = path.as_ref();
    assert!(
        !path.exists(),
        "Expected directory {} not to exist",
        path.display()
    );
}
