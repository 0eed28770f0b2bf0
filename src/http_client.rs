//! Thin wrapper over [`reqwest`] that binds every request to a base URL.
//!
//! The publisher and the aggregator each get their own [`HttpClient`] so the
//! two endpoints cannot be mixed up at a call site. Requests are assembled
//! with a chained [`RequestBuilder`] and sent through the underlying
//! `reqwest::Client`, which carries the per-request timeout and connection
//! pool.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Body, Client, Method, Response};
use url::Url;

use crate::constants::DEFAULT_REQUEST_TIMEOUT;

/// HTTP client bound to a single base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: Url,
    client: Client,
}

impl HttpClient {
    /// Creates a builder for the given base URL.
    ///
    /// Trailing slashes are stripped from the URL path, so `https://host/`
    /// and `https://host` produce identical requests.
    pub fn builder(base_url: &str) -> Result<HttpClientBuilder, url::ParseError> {
        Ok(HttpClientBuilder::new(Url::parse(base_url)?))
    }

    /// Starts a request against the base URL.
    pub fn request(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl HttpClientBuilder {
    fn new(mut base_url: Url) -> Self {
        let trimmed = base_url.path().trim_end_matches('/').to_string();
        base_url.set_path(&trimmed);
        Self { base_url, timeout: DEFAULT_REQUEST_TIMEOUT, default_headers: HeaderMap::new() }
    }

    /// Timeout covering the whole exchange of each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Header attached to every request sent through the client.
    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn build(self) -> Result<HttpClient, reqwest::Error> {
        let client = Client::builder().timeout(self.timeout).default_headers(self.default_headers).build()?;
        Ok(HttpClient { base_url: self.base_url, client })
    }
}

/// Builder for a single request.
#[derive(Debug)]
pub struct RequestBuilder<'a> {
    client: &'a HttpClient,
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Body>,
}

impl<'a> RequestBuilder<'a> {
    fn new(client: &'a HttpClient) -> Self {
        Self { client, method: Method::GET, url: client.base_url.clone(), headers: HeaderMap::new(), body: None }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Appends path segments. Embedded and empty separators are tolerated,
    /// so `path("v1/blobs")` and `path("v1").path("blobs")` are equivalent.
    pub fn path(mut self, segment: &str) -> Self {
        if let Ok(mut segments) = self.url.path_segments_mut() {
            segments.pop_if_empty().extend(segment.split('/').filter(|part| !part.is_empty()));
        }
        self
    }

    pub fn query_param(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    pub fn query_params<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        for (name, value) in params {
            self = self.query_param(name, &value);
        }
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub async fn send(self) -> Result<Response, reqwest::Error> {
        let mut request = self.client.client.request(self.method, self.url).headers(self.headers);
        if let Some(body) = self.body {
            request = request.body(body);
        }
        request.send().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped_from_the_base_url() {
        let with_slash = HttpClient::builder("http://localhost:9999/prefix/").unwrap().build().unwrap();
        let without_slash = HttpClient::builder("http://localhost:9999/prefix").unwrap().build().unwrap();
        assert_eq!(with_slash.base_url().as_str(), without_slash.base_url().as_str());
    }

    #[test]
    fn path_segments_and_query_params_compose() {
        let client = HttpClient::builder("http://localhost:9999/").unwrap().build().unwrap();
        let request = client.request().path("v1/blobs").path("some-blob-id").query_param("epochs", "5");
        assert_eq!(request.url.as_str(), "http://localhost:9999/v1/blobs/some-blob-id?epochs=5");
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let client = HttpClient::builder("http://localhost:9999").unwrap().build().unwrap();
        let request = client.request().path("v1/blobs").path("id with spaces");
        assert_eq!(request.url.as_str(), "http://localhost:9999/v1/blobs/id%20with%20spaces");
    }
}
