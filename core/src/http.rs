//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and parses `HttpResponse` values; the host (the viewer binary or a
//! test) executes the round-trip. The query string is kept as ordered pairs
//! and only rendered into a URL by `HttpRequest::url`, so tests can assert on
//! the parameters directly.

use url::form_urlencoded;

/// HTTP method for a request. The catalog only ever reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Full URL including the encoded query string, if any.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{query}", self.path)
    }

    /// Value of the first query parameter named `key`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data, built by the host after
/// executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: &[(&str, &str)]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "http://localhost:3000/products".to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers: Vec::new(),
        }
    }

    #[test]
    fn url_without_query_is_the_path() {
        assert_eq!(request(&[]).url(), "http://localhost:3000/products");
    }

    #[test]
    fn url_keeps_query_order() {
        let req = request(&[("page", "2"), ("limit", "12")]);
        assert_eq!(req.url(), "http://localhost:3000/products?page=2&limit=12");
    }

    #[test]
    fn url_encodes_reserved_characters() {
        let req = request(&[("q", "a&b=c d")]);
        assert_eq!(req.url(), "http://localhost:3000/products?q=a%26b%3Dc+d");
    }

    #[test]
    fn query_param_finds_first_match() {
        let req = request(&[("page", "3"), ("page", "4")]);
        assert_eq!(req.query_param("page"), Some("3"));
        assert_eq!(req.query_param("limit"), None);
    }

    #[test]
    fn success_covers_2xx_only() {
        let mut resp = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(resp.is_success());
        resp.status = 301;
        assert!(!resp.is_success());
        resp.status = 199;
        assert!(!resp.is_success());
    }
}
