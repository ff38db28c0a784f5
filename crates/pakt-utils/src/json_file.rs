use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;
use std::path::Path;

use pakt_error::{PackageManagerError, Result};

/// Reads and parses a JSON state file. Returns `Ok(None)` when the file does
/// not exist; a file that exists but does not parse is a `ConfigError`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(PackageManagerError::IoError(format!(
                "Failed to read {}: {e}",
                path.display()
            )));
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| PackageManagerError::ConfigError(format!("{}: {e}", path.display())))
}

/// Writes `value` as pretty JSON. The content goes to a temporary file next to
/// `path` which is then renamed over it, so readers see either the old or the
/// new state.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let content = serde_json::to_string_pretty(value)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| {
        PackageManagerError::IoError(format!("Failed to write {}: {}", path.display(), e.error))
    })?;

    Ok(())
}
