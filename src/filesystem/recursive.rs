use std::fs;
use std::path::Path;

use snafu::ResultExt;
use tracing::{debug, info, warn};

use crate::ext::BestEffortPathExt;

use super::exclusion::ExclusionSpec;
use super::tree::{FilesystemError, IoSnafu, dir_tree};

/// Checks that the root, every directory below it and, unless
/// `check_only_dirs` is set, every file are both readable and writable.
pub fn is_writable_recursive(
    dir: impl AsRef<Path>,
    check_only_dirs: bool,
    ignore_errors: bool,
) -> Result<bool, FilesystemError> {
    let tree = match dir_tree(dir, ExclusionSpec::None, false) {
        Ok(tree) => tree,
        Err(e) => return suppress(e, false, ignore_errors),
    };

    let files = tree.files.iter().filter(|_| !check_only_dirs);
    for path in tree.directories.iter().chain(files) {
        if !is_readable_and_writable(path) {
            debug!("{} is not readable and writable", path.display());
            return Ok(false);
        }
    }

    Ok(true)
}

/// Deletes every file the walk reports, leaving the directory structure intact.
pub fn unlink_recursive(
    dir: impl AsRef<Path>,
    exclusions: impl Into<ExclusionSpec>,
    ignore_errors: bool,
) -> Result<bool, FilesystemError> {
    let dir = dir.as_ref();
    let result = dir_tree(dir, exclusions, false).and_then(|tree| {
        for file in &tree.files {
            fs::remove_file(file).context(IoSnafu {
                operation: "remove file",
                path: file.clone(),
            })?;
        }
        Ok(tree.files.len())
    });

    match result {
        Ok(removed) => {
            info!(
                "Removed {} files below {}",
                removed,
                dir.best_effort_path_display()
            );
            Ok(true)
        }
        Err(e) => suppress(e, false, ignore_errors),
    }
}

/// Removes `dir` with everything below it.
///
/// Returns `Ok(false)` without touching anything when `dir` is not a
/// directory. Removal is not atomic: a failure part way leaves whatever was
/// not yet deleted in place.
pub fn rmdir_recursive(dir: impl AsRef<Path>) -> Result<bool, FilesystemError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        debug!("{} is not a directory, nothing to remove", dir.display());
        return Ok(false);
    }

    fs::remove_dir_all(dir).context(IoSnafu {
        operation: "remove directory",
        path: dir.to_path_buf(),
    })?;
    info!("Removed directory {}", dir.display());

    Ok(true)
}

fn suppress<T>(error: FilesystemError, default: T, ignore_errors: bool) -> Result<T, FilesystemError> {
    if ignore_errors {
        warn!("Ignoring error: {}", error);
        Ok(default)
    } else {
        Err(error)
    }
}

/// An entry with no write bits at all is never writable, even for root.
#[cfg(unix)]
fn is_readable_and_writable(path: &Path) -> bool {
    use nix::unistd::{AccessFlags, access};

    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if metadata.permissions().readonly() {
        return false;
    }

    access(path, AccessFlags::R_OK | AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn is_readable_and_writable(path: &Path) -> bool {
    use std::fs::OpenOptions;

    let Ok(metadata) = path.metadata() else {
        return false;
    };
    if metadata.permissions().readonly() {
        return false;
    }

    if metadata.is_dir() {
        fs::read_dir(path).is_ok()
    } else if metadata.is_file() {
        OpenOptions::new().read(true).append(true).open(path).is_ok()
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asserts::{
        assert_dir_exists, assert_dir_not_exists, assert_directory_empty, assert_file_exists,
        assert_file_not_exists, assert_files_count,
    };
    use rstest::*;
    use tempfile::TempDir;

    #[fixture]
    fn tree() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        for dir in ["empty", "sub1/nested", "sub2", ".hidden"] {
            fs::create_dir_all(root.join(dir)).expect("Failed to create directory");
        }
        for file in [
            "top.txt",
            ".hiddenFile",
            "sub1/a.txt",
            "sub1/nested/b.txt",
            "sub2/c.log",
            ".hidden/d.txt",
        ] {
            fs::write(root.join(file), file).expect("Failed to write file");
        }
        temp_dir
    }

    #[rstest]
    fn test_unlink_recursive_keeps_directories(tree: TempDir) {
        assert!(unlink_recursive(tree.path(), false, false).unwrap());

        assert_files_count(tree.path(), 0);
        for dir in ["empty", "sub1", "sub1/nested", "sub2", ".hidden"] {
            assert_dir_exists(tree.path().join(dir));
        }
        assert_directory_empty(tree.path().join("sub1/nested"));
    }

    #[rstest]
    fn test_unlink_recursive_honours_exclusions(tree: TempDir) {
        assert!(unlink_recursive(tree.path(), [".", "\\.log$"], false).unwrap());

        assert_file_not_exists(tree.path().join("top.txt"));
        assert_file_not_exists(tree.path().join("sub1/nested/b.txt"));
        assert_file_exists(tree.path().join("sub2/c.log"));
        assert_file_exists(tree.path().join(".hiddenFile"));
        assert_file_exists(tree.path().join(".hidden/d.txt"));
    }

    #[test]
    fn test_unlink_recursive_on_missing_directory() {
        let result = unlink_recursive("/this/path/does/not/exist", false, false);
        assert!(matches!(
            result,
            Err(FilesystemError::DirectoryNotFound { .. })
        ));

        let result = unlink_recursive("/this/path/does/not/exist", false, true);
        assert!(!result.unwrap());
    }

    #[rstest]
    fn test_rmdir_recursive_removes_everything(tree: TempDir) {
        let root = tree.path().to_path_buf();
        assert!(rmdir_recursive(&root).unwrap());
        assert_dir_not_exists(&root);
    }

    #[rstest]
    fn test_rmdir_recursive_on_regular_file(tree: TempDir) {
        let file = tree.path().join("top.txt");
        assert!(!rmdir_recursive(&file).unwrap());
        assert_file_exists(&file);
    }

    #[test]
    fn test_rmdir_recursive_on_missing_path() {
        assert!(!rmdir_recursive("/this/path/does/not/exist").unwrap());
    }

    #[rstest]
    fn test_is_writable_recursive(tree: TempDir) {
        assert!(is_writable_recursive(tree.path(), true, false).unwrap());
        assert!(is_writable_recursive(tree.path(), false, false).unwrap());
    }

    #[test]
    fn test_is_writable_recursive_on_missing_directory() {
        let result = is_writable_recursive("/this/path/does/not/exist", true, false);
        assert!(matches!(
            result,
            Err(FilesystemError::DirectoryNotFound { .. })
        ));
        assert!(!is_writable_recursive("/this/path/does/not/exist", true, true).unwrap());
    }

    #[cfg(unix)]
    #[rstest]
    fn test_is_writable_recursive_detects_read_only_entries(tree: TempDir) {
        use std::os::unix::fs::PermissionsExt;

        let file = tree.path().join("sub1/a.txt");
        fs::set_permissions(&file, fs::Permissions::from_mode(0o444)).unwrap();
        assert!(is_writable_recursive(tree.path(), true, false).unwrap());
        assert!(!is_writable_recursive(tree.path(), false, false).unwrap());

        let dir = tree.path().join("sub2");
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o555)).unwrap();
        assert!(!is_writable_recursive(tree.path(), true, false).unwrap());

        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    fn running_as_root() -> bool {
        nix::unistd::geteuid().is_root()
    }

    #[cfg(unix)]
    fn set_mode(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .expect("Failed to set permissions");
    }

    #[cfg(unix)]
    #[test]
    fn test_directory_owned_by_someone_else_is_not_writable() {
        if running_as_root() {
            return;
        }

        // Root owned and 0755 on every unix system.
        assert!(!is_readable_and_writable(Path::new("/")));
    }

    #[cfg(unix)]
    #[rstest]
    fn test_is_writable_recursive_without_write_access_to_directory(tree: TempDir) {
        if running_as_root() {
            return;
        }

        let dir = tree.path().join("sub1");
        set_mode(&dir, 0o500);
        let writable = is_writable_recursive(tree.path(), true, false);
        set_mode(&dir, 0o755);

        assert!(!writable.unwrap());
    }

    #[cfg(unix)]
    #[rstest]
    fn test_unlink_recursive_reports_failed_deletion(tree: TempDir) {
        if running_as_root() {
            return;
        }

        let dir = tree.path().join("sub2");
        set_mode(&dir, 0o555);
        let strict = unlink_recursive(tree.path(), false, false);
        let lenient = unlink_recursive(tree.path(), false, true);
        set_mode(&dir, 0o755);

        assert!(matches!(
            strict,
            Err(FilesystemError::IoError {
                operation: "remove file",
                ..
            })
        ));
        assert!(!lenient.unwrap());
        assert_file_exists(tree.path().join("sub2/c.log"));
    }

    #[cfg(unix)]
    #[rstest]
    fn test_rmdir_recursive_reports_failed_removal(tree: TempDir) {
        if running_as_root() {
            return;
        }

        let dir = tree.path().join("sub2");
        set_mode(&dir, 0o555);
        let result = rmdir_recursive(tree.path());
        set_mode(&dir, 0o755);

        assert!(matches!(
            result,
            Err(FilesystemError::IoError {
                operation: "remove directory",
                ..
            })
        ));
        assert_file_exists(tree.path().join("sub2/c.log"));
    }
}
