use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP request method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Head,
    Post,
    Put,
    Delete,
    Patch,
    Options,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the page intends to do with the response.
///
/// Only `Document` (a top-level navigation) changes how the worker behaves:
/// it is the one destination that gets the offline page when the network
/// is unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    #[default]
    Empty,
    Document,
    Frame,
    Image,
    Script,
    Style,
    Font,
    Manifest,
    Audio,
    Video,
    Worker,
}

/// Identity a request is cached under: method plus URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestKey(String);

impl RequestKey {
    pub fn new(method: Method, url: &str) -> Self {
        Self(format!("{} {}", method, url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An intercepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub destination: Destination,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl Request {
    /// A plain GET with no particular destination (fetch(), XHR, precache).
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            destination: Destination::Empty,
            headers: BTreeMap::new(),
        }
    }

    /// A top-level navigation.
    pub fn navigate(url: impl Into<String>) -> Self {
        Self::get(url).with_destination(Destination::Document)
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn key(&self) -> RequestKey {
        RequestKey::new(self.method, &self.url)
    }

    pub fn is_navigation(&self) -> bool {
        self.destination == Destination::Document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_includes_method_and_url() {
        let get = Request::get("/api/search");
        let post = Request::get("/api/search").with_method(Method::Post);

        assert_eq!(get.key().as_str(), "GET /api/search");
        assert_ne!(get.key(), post.key());
    }

    #[test]
    fn test_navigate_is_document() {
        assert!(Request::navigate("/").is_navigation());
        assert!(!Request::get("/pickme_logo.png").is_navigation());
        assert!(!Request::get("/pickme_logo.png")
            .with_destination(Destination::Image)
            .is_navigation());
    }

    #[test]
    fn test_destination_deserializes_lowercase() {
        let d: Destination = serde_json::from_str("\"document\"").unwrap();
        assert_eq!(d, Destination::Document);
    }
}
