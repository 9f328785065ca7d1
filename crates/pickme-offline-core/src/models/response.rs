use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How the fetch layer classified a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Same-origin, readable
    #[default]
    Basic,
    /// Cross-origin, readable through CORS
    Cors,
    /// Cross-origin no-cors, unreadable
    Opaque,
    /// Network error placeholder
    Error,
}

/// A response snapshot: status, headers and the full body.
///
/// Bodies are owned bytes. Handing a response to the page and storing it
/// needs two copies, so callers `clone()` before either side takes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Vec<u8>,
    #[serde(default)]
    pub response_type: ResponseType,
    #[serde(default)]
    pub url: Option<String>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
            response_type: ResponseType::Basic,
            url: None,
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    /// A `200` HTML document built in-process.
    pub fn html(body: &str) -> Self {
        Self::ok(body.as_bytes().to_vec()).with_header("content-type", "text/html")
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Header lookup, case-insensitive on the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// 2xx, the bar a precache fetch must clear.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether a network response may be put into the cache: exactly `200`
    /// and same-origin. Redirect-followed 2xx, CORS and opaque responses are
    /// handed back to the page without being stored.
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.response_type == ResponseType::Basic
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cacheable() {
        assert!(Response::ok("hi").is_cacheable());
        assert!(!Response::new(404, "missing").is_cacheable());
        assert!(!Response::new(204, "").is_cacheable());
        assert!(!Response::ok("x").with_type(ResponseType::Opaque).is_cacheable());
        assert!(!Response::ok("x").with_type(ResponseType::Cors).is_cacheable());
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = Response::ok("").with_header("Content-Type", "image/png");
        assert_eq!(response.header("content-type"), Some("image/png"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("image/png"));
        assert_eq!(response.content_type(), Some("image/png"));
    }

    #[test]
    fn test_html_sets_content_type() {
        let response = Response::html("<p>hi</p>");
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), Some("text/html"));
        assert_eq!(response.text(), "<p>hi</p>");
    }
}
