pub mod http;

pub use http::HttpTransport;

use std::path::Path;

use pakt_error::Result;

/// Called with `(bytes written so far, advertised total)` after every chunk.
pub type ProgressFn<'a> = dyn FnMut(u64, Option<u64>) + 'a;

/// Remote access used by the repository store and the installer.
pub trait Transport {
    /// Fetches a small text document (a repository manifest).
    fn get_text(&self, url: &str) -> Result<String>;

    /// Streams the body at `url` into `dest`, returning the number of bytes
    /// written. On failure no partial file is left at `dest`.
    fn download(&self, url: &str, dest: &Path, progress: &mut ProgressFn<'_>) -> Result<u64>;
}
