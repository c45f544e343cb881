//! Directory tree traversal, recursive cleanup and small path helpers.
//!
//! The core is [`filesystem::dir_tree`], a deterministic recursive listing
//! with dot-entry hiding and pattern based pruning. [`filesystem`] builds
//! the recursive writable check and delete operations on top of it.
#![allow(clippy::module_inception)]

pub mod application;
pub mod asserts;
pub mod cli;
pub mod config;
pub mod ext;
pub mod filesystem;
pub mod helpers;
pub mod path;

pub use filesystem::{
    CompiledExclusion, ExclusionSpec, FilesystemError, TreeResult, dir_tree,
    is_writable_recursive, rmdir_recursive, unlink_recursive,
};
