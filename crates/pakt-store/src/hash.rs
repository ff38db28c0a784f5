use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use pakt_error::{PackageManagerError, Result};
use pakt_logger;

/// Streaming sha256 of a file, lowercase hex.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 4096];

    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(buf.get(..read).unwrap_or_default());
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Hashes a cached archive and compares it with `expected` (case-insensitive
/// hex). A mismatch deletes the cached file so it cannot be reused, and is
/// returned as `HashMismatch`. Returns the computed digest on success.
pub fn verify_archive(name: &str, path: &Path, expected: &str) -> Result<String> {
    let actual = hash_file(path)?;
    if actual.eq_ignore_ascii_case(expected.trim()) {
        return Ok(actual);
    }

    pakt_logger::debug(&format!(
        "Removing {} after hash mismatch",
        path.display()
    ));
    if let Err(e) = std::fs::remove_file(path) {
        pakt_logger::debug(&format!("Could not remove {}: {e}", path.display()));
    }
    Err(PackageManagerError::HashMismatch(
        name.to_string(),
        expected.to_string(),
        actual,
    ))
}
