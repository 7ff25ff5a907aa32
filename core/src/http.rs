//! HTTP exchange types for the host-does-IO pattern.
//!
//! # Design
//! A SOAP call is always a POST of an XML envelope, so the request carries
//! the target URL, headers and body only. `FedexClient` produces these
//! values and consumes `HttpResponse` without touching the network; a
//! `Transport` (or the caller) executes the round-trip in between.

/// A SOAP POST described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
