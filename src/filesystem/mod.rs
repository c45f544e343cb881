//! Directory tree traversal and the recursive operations built on it.
//!
//! [`dir_tree`] walks a directory, pruning excluded subtrees before descent,
//! and reports directories and files in a deterministic order. The recursive
//! operations consume that listing to check permissions or delete entries.

mod exclusion;
mod recursive;
mod tree;

pub use exclusion::{CompiledExclusion, ExclusionSpec};
pub use recursive::{is_writable_recursive, rmdir_recursive, unlink_recursive};
pub use tree::{FilesystemError, TreeResult, dir_tree};
