use std::path::{Component, Path, PathBuf};

use crate::config::ProjectConfig;
use crate::ext::absolute_lexical;

/// Path of `path` as seen from the directory `from`.
///
/// Both sides are made absolute against the current directory and resolved
/// lexically, so neither has to exist. Paths on different prefixes (Windows
/// drives) cannot be related and `path` is returned in absolute form.
pub fn relative_path(path: impl AsRef<Path>, from: impl AsRef<Path>) -> PathBuf {
    let path = absolute_lexical(path.as_ref());
    let from = absolute_lexical(from.as_ref());

    let path_components: Vec<Component> = path.components().collect();
    let from_components: Vec<Component> = from.components().collect();

    if path_components.first() != from_components.first() {
        return path;
    }

    let common = path_components
        .iter()
        .zip(from_components.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let relative: PathBuf = std::iter::repeat_n(Component::ParentDir, from_components.len() - common)
        .chain(path_components[common..].iter().copied())
        .collect();

    if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative
    }
}

/// Relative to root: `path` as seen from the configured project root.
pub fn rtr(path: impl AsRef<Path>, config: &ProjectConfig) -> PathBuf {
    relative_path(path, config.project_root())
}
