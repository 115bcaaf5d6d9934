use crate::data::{MutationConfig, Scope};

/// Canonical relative form of a URL path: repeated separators collapsed,
/// leading and trailing separators removed.
///
/// # Examples
///
/// ```
/// use remut_mutate::core::normalize_path;
///
/// assert_eq!(normalize_path("//teams///7/"), "teams/7");
/// assert_eq!(normalize_path(""), "");
/// ```
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join `base` and a relative path with exactly one separator.
///
/// An empty relative path yields the base without its trailing separator,
/// so composing a composed path again with `""` is a no-op.
///
/// # Examples
///
/// ```
/// use remut_mutate::core::compose_path;
///
/// assert_eq!(compose_path("/a/", "/b/"), "/a/b");
/// assert_eq!(compose_path("https://api.example.com", ""), "https://api.example.com");
/// ```
pub fn compose_path(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = normalize_path(relative);
    if relative.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{relative}")
    }
}

/// URL a mutation targets, before any DELETE identifier is appended.
pub fn resolve_url(scope: &Scope, config: &MutationConfig) -> String {
    let path = config.path.as_deref().unwrap_or_default();
    if config.absolute {
        let base = config.base.as_deref().unwrap_or(&scope.original_base);
        compose_path(base, path)
    } else {
        compose_path(&scope.base, path)
    }
}

/// Scope handed to definitions nested under this mutation. Absolute
/// mutations do not extend the chain.
pub fn child_scope(scope: &Scope, config: &MutationConfig) -> Scope {
    if config.absolute {
        scope.clone()
    } else {
        scope.nest(config.path.as_deref().unwrap_or_default())
    }
}
