/// Splits `name@version` into its parts. A bare name has no version.
///
/// An empty name or an empty version after the `@` is treated as a bare
/// name so that `foo@` does not pin an empty version.
#[must_use]
pub fn parse_pkg_spec(spec: &str) -> (String, Option<String>) {
    match spec.split_once('@') {
        Some((name, version)) if !name.is_empty() && !version.is_empty() => {
            (name.to_string(), Some(version.to_string()))
        }
        Some((name, _)) if !name.is_empty() => (name.to_string(), None),
        _ => (spec.to_string(), None),
    }
}
