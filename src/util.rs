//! Small helpers for PHP names.

/// Strip the leading `\` from a fully-qualified name, so that `\Foo\Bar`
/// and `Foo\Bar` address the same symbol.
pub fn normalize_name(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

/// Strip the leading `$` from a variable name.
pub fn normalize_var_name(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}

/// The last segment of a namespaced name (`Foo\Bar\baz` → `baz`).
pub fn short_name(name: &str) -> &str {
    match memchr::memrchr(b'\\', name.as_bytes()) {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Number of namespace separators in a name.
pub fn namespace_depth(name: &str) -> usize {
    memchr::memchr_iter(b'\\', name.as_bytes()).count()
}

/// The root-namespace name PHP falls back to when an unqualified function
/// call is not found in the current namespace.
///
/// Only names written as `\Ns\func` (more than one separator) have a
/// fallback; `\func` already lives in the root namespace.
pub fn root_namespace_fallback(name: &str) -> Option<String> {
    if namespace_depth(name) > 1 {
        Some(format!("\\{}", short_name(name)))
    } else {
        None
    }
}
