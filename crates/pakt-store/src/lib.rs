pub mod archive;
pub mod cache;
pub mod hash;

pub use archive::{ArchiveFormat, PackageStore};
pub use cache::{CleanReport, DownloadCache};
pub use hash::{hash_file, verify_archive};
