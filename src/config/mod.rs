mod config;

pub use config::{ConfigCreationError, ProjectConfig};
