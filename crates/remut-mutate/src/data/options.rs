use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::error::BoxError;

/// HTTP header set with case-insensitive names.
///
/// Names are stored lowercased, so inserting `Content-Type` after
/// `content-type` replaces the earlier value instead of adding a second one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    pub fn new() -> Self { Self::default() }

    /// Insert a header, replacing any value already stored under the same name.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.as_ref().to_ascii_lowercase(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool { self.get(name).is_some() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` on top of `self`: same-named keys take `other`'s value,
    /// keys only present in `self` persist.
    pub fn overlay(&mut self, other: &Headers) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Authentication attached to a request by the transport.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Bearer(String),
    Basic { username: String, password: Option<String> },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Bearer(_) => f.write_str("Bearer(***)"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Transport options for a mutation request.
///
/// Options come in three layers (ambient scope, call site, single
/// invocation). [`RequestOptions::layer`] merges one layer over another.
///
/// # Examples
///
/// ```
/// use remut_mutate::RequestOptions;
/// use std::time::Duration;
///
/// let options = RequestOptions::default()
///     .header("X-Client", "remut")
///     .bearer("token")
///     .timeout(Duration::from_secs(10));
/// assert_eq!(options.headers.get("x-client"), Some("remut"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Headers to send. Merged key by key across layers.
    pub headers: Headers,

    /// Per-request timeout. No timeout is applied when unset.
    pub timeout: Option<Duration>,

    pub credentials: Option<Credentials>,
}

impl RequestOptions {
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::Bearer(token.into()));
        self
    }

    #[must_use]
    pub fn basic(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.credentials = Some(Credentials::Basic {
            username: username.into(),
            password,
        });
        self
    }

    /// Merge `upper` over `self`. Set fields in `upper` win; headers are
    /// overlaid key by key rather than replaced wholesale.
    #[must_use]
    pub fn layer(&self, upper: &RequestOptions) -> RequestOptions {
        let mut headers = self.headers.clone();
        headers.overlay(&upper.headers);
        RequestOptions {
            headers,
            timeout: upper.timeout.or(self.timeout),
            credentials: upper.credentials.clone().or_else(|| self.credentials.clone()),
        }
    }
}

type Producer = dyn Fn() -> Result<RequestOptions, BoxError> + Send + Sync;

/// Source of ambient request options: a fixed value, or a producer invoked
/// on every request so time-varying values (tokens) are re-read each call.
#[derive(Clone)]
pub enum OptionsProvider {
    Static(RequestOptions),
    Dynamic(Arc<Producer>),
}

impl OptionsProvider {
    pub fn dynamic<F>(producer: F) -> Self
    where
        F: Fn() -> Result<RequestOptions, BoxError> + Send + Sync + 'static,
    {
        OptionsProvider::Dynamic(Arc::new(producer))
    }

    /// Produce the options for one request. Never cached.
    pub fn resolve(&self) -> Result<RequestOptions, BoxError> {
        match self {
            OptionsProvider::Static(options) => Ok(options.clone()),
            OptionsProvider::Dynamic(producer) => producer(),
        }
    }
}

impl Default for OptionsProvider {
    fn default() -> Self { OptionsProvider::Static(RequestOptions::default()) }
}

impl From<RequestOptions> for OptionsProvider {
    fn from(options: RequestOptions) -> Self { OptionsProvider::Static(options) }
}

impl fmt::Debug for OptionsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsProvider::Static(options) => f.debug_tuple("Static").field(options).finish(),
            OptionsProvider::Dynamic(_) => f.write_str("Dynamic({ ... })"),
        }
    }
}
