pub mod manager;
pub mod types;

pub use manager::InstallManager;
pub use types::{DependencyPolicy, InstallReport, InstallRequest};
