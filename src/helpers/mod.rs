//! Small string, path and collection helpers.

mod objects;
mod relative;
mod strings;

pub use objects::{KeyedObject, objects_keys, objects_map};
pub use relative::{relative_path, rtr};
pub use strings::{is_email, is_json, is_windows_os, str_lower, str_upper};
