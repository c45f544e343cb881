//! Panicking assertions about filesystem state, for use in tests.

mod asserts;

pub use asserts::{
    assert_dir_exists, assert_dir_not_exists, assert_dir_tree_eq, assert_directory_empty,
    assert_directory_not_empty, assert_file_exists, assert_file_not_exists,
    assert_file_permissions, assert_files_count, assert_not_files_count,
};
