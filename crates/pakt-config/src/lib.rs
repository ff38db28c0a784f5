pub mod config;
pub mod paths;

pub use config::{Config, RepositoryConfig, Settings};
pub use paths::AppPaths;
