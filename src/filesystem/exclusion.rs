use std::collections::BTreeSet;

use regex::Regex;
use tracing::debug;

const HIDE_DOT_ENTRIES_TOKEN: &str = ".";

/// Caller supplied directive describing which entries a walk should omit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExclusionSpec {
    #[default]
    None,
    HideDotEntries,
    /// Basenames or regex fragments. A `"."` member also hides dot-entries.
    Patterns(Vec<String>),
}

impl From<bool> for ExclusionSpec {
    fn from(hide_dot_entries: bool) -> Self {
        if hide_dot_entries {
            ExclusionSpec::HideDotEntries
        } else {
            ExclusionSpec::None
        }
    }
}

impl From<Vec<String>> for ExclusionSpec {
    fn from(patterns: Vec<String>) -> Self {
        ExclusionSpec::Patterns(patterns)
    }
}

impl From<&[&str]> for ExclusionSpec {
    fn from(patterns: &[&str]) -> Self {
        ExclusionSpec::Patterns(patterns.iter().map(|p| p.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ExclusionSpec {
    fn from(patterns: [&str; N]) -> Self {
        patterns.as_slice().into()
    }
}

impl<T: Into<ExclusionSpec>> From<Option<T>> for ExclusionSpec {
    fn from(spec: Option<T>) -> Self {
        spec.map(Into::into).unwrap_or_default()
    }
}

#[derive(Debug)]
struct NamePattern {
    literal: String,
    regex: Option<Regex>,
}

impl NamePattern {
    fn new(literal: String) -> Self {
        let regex = match Regex::new(&literal) {
            Ok(regex) => Some(regex),
            Err(e) => {
                debug!("Exclusion '{}' is not a valid regex, matching literally: {}", literal, e);
                None
            }
        };
        NamePattern { literal, regex }
    }

    fn matches(&self, basename: &str) -> bool {
        basename == self.literal || self.regex.as_ref().is_some_and(|re| re.is_match(basename))
    }
}

/// Structured filter derived from an [`ExclusionSpec`] for a single walk.
#[derive(Debug, Default)]
pub struct CompiledExclusion {
    hide_dot_entries: bool,
    name_patterns: Vec<NamePattern>,
}

impl CompiledExclusion {
    pub fn compile(spec: &ExclusionSpec) -> Self {
        match spec {
            ExclusionSpec::None => Self::default(),
            ExclusionSpec::HideDotEntries => CompiledExclusion {
                hide_dot_entries: true,
                name_patterns: Vec::new(),
            },
            ExclusionSpec::Patterns(patterns) => {
                let hide_dot_entries = patterns.iter().any(|p| p == HIDE_DOT_ENTRIES_TOKEN);
                let name_patterns = patterns
                    .iter()
                    .filter(|p| p.as_str() != HIDE_DOT_ENTRIES_TOKEN)
                    .cloned()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .map(NamePattern::new)
                    .collect();

                CompiledExclusion {
                    hide_dot_entries,
                    name_patterns,
                }
            }
        }
    }

    pub fn is_excluded(&self, basename: &str) -> bool {
        if self.hide_dot_entries && basename.starts_with('.') {
            return true;
        }
        self.name_patterns.iter().any(|p| p.matches(basename))
    }
}
