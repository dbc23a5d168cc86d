//! Literal name-prefix matching used by every scan.

/// Checks whether `name` starts with any key in `keys`.
///
/// Matching is case-sensitive and anchored at the start of the name; keys
/// carry no wildcard or path-separator meaning.
pub fn matches<S: AsRef<str>>(name: &str, keys: &[S]) -> bool {
    keys.iter().any(|key| name.starts_with(key.as_ref()))
}

/// Like [`matches`], additionally accepting any key from `extra`.
pub fn matches_with_extra<S: AsRef<str>, T: AsRef<str>>(
    name: &str,
    keys: &[S],
    extra: &[T],
) -> bool {
    matches(name, keys) || matches(name, extra)
}
