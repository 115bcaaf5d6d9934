use std::future::Future;

use crate::data::{RequestDescriptor, Response};

/// Asynchronous transport a mutation is dispatched through.
///
/// Implementations send exactly one request per call and read the whole
/// response body. A returned error means the request could not be completed
/// at all (DNS, connection, body read); HTTP error statuses are *not* errors
/// at this level and come back as an ordinary [`Response`].
///
/// # Implementations
///
/// - [`ReqwestTransport`]: production implementation using `reqwest`
/// - Scripted mocks in tests
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn send(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<Response, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::{Credentials, Verb};

    /// Production transport backed by a shared `reqwest::Client`.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Result<Self, reqwest::Error> {
            let client = reqwest::Client::builder().build()?;
            Ok(Self { client })
        }

        /// Use a preconfigured client (proxies, TLS roots, default timeouts).
        pub fn with_client(client: reqwest::Client) -> Self { Self { client } }
    }

    fn method(verb: Verb) -> reqwest::Method {
        match verb {
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }

    /// The reason phrase the server sent. hyper only records it when it
    /// differs from the canonical one for the status.
    fn reason_phrase(response: &reqwest::Response) -> String {
        match response.extensions().get::<hyper::ext::ReasonPhrase>() {
            Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
            None => response.status().canonical_reason().unwrap_or_default().to_string(),
        }
    }

    impl Transport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn send(&self, request: &RequestDescriptor) -> Result<Response, Self::Error> {
            let mut builder = self.client.request(method(request.method), &request.url);

            for (name, value) in request.headers.iter() {
                builder = builder.header(name, value);
            }
            if let Some(body) = &request.body {
                builder = builder.body(body.clone());
            }
            if let Some(timeout) = request.timeout {
                builder = builder.timeout(timeout);
            }
            builder = match &request.credentials {
                Some(Credentials::Bearer(token)) => builder.bearer_auth(token),
                Some(Credentials::Basic { username, password }) => {
                    builder.basic_auth(username, password.as_ref())
                }
                None => builder,
            };

            let response = builder.send().await?;
            let status = response.status();
            let status_text = reason_phrase(&response);
            let headers = response.headers().clone();
            let body = response.bytes().await?;

            Ok(Response {
                status: status.as_u16(),
                status_text,
                headers,
                body,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestTransport;
