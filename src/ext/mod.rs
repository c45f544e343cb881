mod path_ext;

pub use path_ext::{BestEffortPathExt, absolute_lexical, normalize_lexically};
