//! String-level path predicates and permission formatting.

mod classifier;

pub use classifier::{
    ClassifierError, Perms, add_trailing_slash, extension_of, file_perms, is_slash_terminated,
    perms_as_four_digit_octal, perms_to_string,
};
