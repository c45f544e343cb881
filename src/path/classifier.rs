use std::path::{MAIN_SEPARATOR, Path};

use derive_more::From;
use snafu::Snafu;

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Returns whether `path` ends with a forward or backward slash.
pub fn is_slash_terminated(path: &str) -> Result<bool, ClassifierError> {
    match path.chars().last() {
        Some(last) => Ok(SEPARATORS.contains(&last)),
        None => InvalidInputSnafu {
            reason: "cannot check the last character of an empty path",
        }
        .fail(),
    }
}

/// Appends the platform separator unless `path` already ends with a slash.
pub fn add_trailing_slash(path: &str) -> String {
    match is_slash_terminated(path) {
        Ok(true) => path.to_string(),
        _ => format!("{path}{MAIN_SEPARATOR}"),
    }
}

/// Extracts the lower-cased extension of a file name, path or URL.
///
/// Query strings and fragments are dropped and both `/` and `\` count as
/// directory separators, whatever the host platform. Everything after the
/// first dot of the basename is returned, so `backup.sql.gz` yields `sql.gz`.
/// A leading dot does not start an extension: `.hiddenFile` has none.
pub fn extension_of(filename_or_url: &str) -> Option<String> {
    let without_query = filename_or_url
        .split(['?', '#'])
        .next()
        .unwrap_or(filename_or_url);
    let basename = without_query
        .rsplit(SEPARATORS)
        .next()
        .unwrap_or(without_query);

    let first_len = basename.chars().next()?.len_utf8();
    let dot = basename[first_len..].find('.')? + first_len;
    let extension = &basename[dot + 1..];
    if extension.is_empty() {
        return None;
    }

    Some(extension.to_lowercase())
}

pub fn perms_as_four_digit_octal(bits: u32) -> String {
    format!("{:04o}", bits & 0o7777)
}

/// Permissions as either raw mode bits or an already formatted string.
#[derive(Debug, Clone, PartialEq, Eq, From)]
pub enum Perms {
    Octal(u32),
    Text(String),
}

impl From<&str> for Perms {
    fn from(value: &str) -> Self {
        Perms::Text(value.to_string())
    }
}

pub fn perms_to_string(perms: impl Into<Perms>) -> String {
    match perms.into() {
        Perms::Octal(bits) => perms_as_four_digit_octal(bits),
        Perms::Text(text) => text,
    }
}

/// Reads the permission bits of `path` as a four digit octal string.
#[cfg(unix)]
pub fn file_perms(path: impl AsRef<Path>) -> std::io::Result<String> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = path.as_ref().metadata()?;
    Ok(perms_as_four_digit_octal(metadata.permissions().mode()))
}

#[cfg(not(unix))]
pub fn file_perms(path: impl AsRef<Path>) -> std::io::Result<String> {
    let metadata = path.as_ref().metadata()?;
    let bits = if metadata.permissions().readonly() {
        0o444
    } else {
        0o666
    };
    Ok(perms_as_four_digit_octal(bits))
}

#[derive(Debug, Snafu)]
pub enum ClassifierError {
    #[snafu(display("Invalid input: {}", reason))]
    InvalidInput { reason: String },
}
