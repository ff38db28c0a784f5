use std::path::{Component, Path};

use pakt_error::{PackageManagerError, Result};

/// Checks that a package or repository name is safe to join onto a state
/// directory: non-empty, no separators, and exactly one normal path
/// component.
pub fn validate_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if name.is_empty() || name.contains(['/', '\\']) || !single_normal {
        return Err(PackageManagerError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Rewrites a string for use inside a file name. Anything outside
/// `[A-Za-z0-9._+-]` becomes `_`, and a result made only of dots is
/// replaced entirely.
#[must_use]
pub fn sanitize_file_component(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.chars().all(|c| c == '.') {
        "_".repeat(cleaned.len().max(1))
    } else {
        cleaned
    }
}
