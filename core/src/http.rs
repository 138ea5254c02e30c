//! HTTP descriptor types for the transport boundary.
//!
//! # Design
//! Requests and responses cross the [`Transport`](crate::Transport) seam as
//! plain data. The core builds [`HttpRequest`] values (path segments already
//! joined, query carried as raw pairs) and interprets [`HttpResponse`]
//! values; it never touches the network itself. Query pairs are left
//! unencoded here so the executing HTTP library performs the encoding once.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub path: String,
    /// Query parameters, unencoded, in append order.
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Non-2xx responses are returned as values, not transport errors, so the
/// core can translate the server's error payload.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
