use std::path::{Component, Path, PathBuf};

/// Canonical form of `path` when it exists, otherwise the absolute,
/// lexically normalized form. Meant for messages, never for I/O.
pub fn best_effort_path_display(path: &Path) -> String {
    match path.canonicalize() {
        Ok(canonical_path) => canonical_path.display().to_string(),
        Err(_) => absolute_lexical(path).display().to_string(),
    }
}

/// Joins relative paths onto the current directory and resolves `.` and `..`
/// without touching the filesystem.
pub fn absolute_lexical(path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        match std::env::current_dir() {
            Ok(current_dir) => normalize_lexically(&current_dir.join(path)),
            Err(_) => normalize_lexically(path),
        }
    }
}

pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` above the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self.as_ref())
    }
}
