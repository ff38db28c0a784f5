pub mod plan;
pub mod resolver;

pub use plan::{InstallPlan, PlannedPackage};
pub use resolver::DependencyResolver;
