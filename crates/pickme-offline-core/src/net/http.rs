//! reqwest-backed `Fetcher`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::{FetchError, Fetcher};
use crate::models::{Method, Request, Response, ResponseType};

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fetches requests from the network, resolving relative URLs against the
/// application origin.
///
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
    origin: Url,
}

impl HttpFetcher {
    pub fn new(origin: &str) -> Result<Self, FetchError> {
        let origin = Url::parse(origin).map_err(|e| FetchError::InvalidUrl {
            url: origin.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, origin })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolve a request URL (absolute, or relative like `/tech.html`)
    /// against the origin.
    pub fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        self.origin.join(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Same origin as the application is `Basic`; anything else is `Cors`.
    pub fn classify(&self, url: &Url) -> ResponseType {
        if url.origin() == self.origin.origin() {
            ResponseType::Basic
        } else {
            ResponseType::Cors
        }
    }

    /// Request headers as a `HeaderMap`. A malformed name or value is a
    /// request error, not a network failure.
    pub fn header_map(request: &Request) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let invalid = |reason: String| FetchError::InvalidHeader {
                name: name.clone(),
                reason,
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
            headers.insert(header_name, header_value);
        }
        Ok(headers)
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let url = self.resolve(&request.url)?;
        let headers = Self::header_map(request)?;
        debug!(method = %request.method, url = %url, "Network fetch");

        let response = self
            .client
            .request(Self::method(request.method), url)
            .headers(headers)
            .send()
            .await?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            match value.to_str() {
                Ok(v) => {
                    headers.insert(name.as_str().to_string(), v.to_string());
                }
                Err(_) => warn!(header = %name, "Dropping non-ASCII response header"),
            }
        }
        let body = response.bytes().await?.to_vec();

        Ok(Response {
            status,
            headers,
            body,
            response_type: self.classify(&final_url),
            url: Some(final_url.to_string()),
        })
    }
}
