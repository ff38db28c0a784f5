pub mod manifest;
pub mod store;

pub use manifest::{PackageDescriptor, RepositoryManifest, manifest_url};
pub use store::{PackageMatch, RepositoryStore};
