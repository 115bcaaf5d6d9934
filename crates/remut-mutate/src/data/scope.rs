use super::options::{OptionsProvider, RequestOptions};
use super::request::Verb;
use crate::core::compose_path;

/// Configuration a parent hands down to the mutations nested under it.
///
/// `base` grows as relative paths are layered on; `original_base` stays at
/// the root and is what absolute mutations fall back to.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    pub base: String,
    pub original_base: String,
    pub request_options: OptionsProvider,
}

impl Scope {
    /// A top-level scope whose base is also its original base.
    pub fn root(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            original_base: base.clone(),
            base,
            request_options: OptionsProvider::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, request_options: impl Into<OptionsProvider>) -> Self {
        self.request_options = request_options.into();
        self
    }

    /// Derive the scope for definitions nested under `path`.
    #[must_use]
    pub fn nest(&self, path: &str) -> Scope {
        Scope {
            base: compose_path(&self.base, path),
            original_base: self.original_base.clone(),
            request_options: self.request_options.clone(),
        }
    }
}

/// Immutable definition of one mutation.
///
/// # Examples
///
/// ```
/// use remut_mutate::{MutationConfig, Verb};
///
/// let config = MutationConfig::new(Verb::Delete).path("widgets");
/// assert_eq!(config.path.as_deref(), Some("widgets"));
/// assert!(!config.absolute);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MutationConfig {
    pub verb: Verb,

    /// Relative path composed onto the scope base.
    pub path: Option<String>,

    /// Override base, only consulted when `absolute` is set.
    pub base: Option<String>,

    /// Ignore the composed scope base and use `base` (or the scope's
    /// original base) instead.
    pub absolute: bool,

    /// Call-site options, layered over the scope's ambient options.
    pub request_options: RequestOptions,
}

impl MutationConfig {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            path: None,
            base: None,
            absolute: false,
            request_options: RequestOptions::default(),
        }
    }

    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    #[must_use]
    pub fn request_options(mut self, request_options: RequestOptions) -> Self {
        self.request_options = request_options;
        self
    }
}
