//! URI path and query augmentation.
//!
//! # Design
//! `UriBuilder` collects path segments and query pairs for one operation and
//! resolves them against the client's root URL. It is a pure in-memory
//! transform; encoding is the transport's job. Filter expressions follow the
//! v2 list convention: a single value renders as `q=name:value`, several as
//! `q=name IN a,b`.

use crate::http::{HttpMethod, HttpRequest};

#[derive(Debug, Default)]
pub(crate) struct UriBuilder {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl UriBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub(crate) fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a v2 `q` filter expression; no-op for an empty value list.
    pub(crate) fn filter(self, name: &str, values: &[String]) -> Self {
        match values {
            [] => self,
            [value] => self.query("q", format!("{name}:{value}")),
            values => self.query("q", format!("{name} IN {}", values.join(","))),
        }
    }

    /// Append v2 pagination parameters (`page`, `results-per-page`).
    pub(crate) fn paged_v2(mut self, page: Option<u32>, results_per_page: Option<u32>) -> Self {
        if let Some(page) = page {
            self = self.query("page", page.to_string());
        }
        if let Some(results_per_page) = results_per_page {
            self = self.query("results-per-page", results_per_page.to_string());
        }
        self
    }

    /// Append v3 pagination parameters (`page`, `per_page`).
    pub(crate) fn paged_v3(mut self, page: Option<u32>, per_page: Option<u32>) -> Self {
        if let Some(page) = page {
            self = self.query("page", page.to_string());
        }
        if let Some(per_page) = per_page {
            self = self.query("per_page", per_page.to_string());
        }
        self
    }

    /// Resolve against `root` into a transport-ready request descriptor.
    pub(crate) fn into_request(
        self,
        method: HttpMethod,
        root: &str,
        body: Option<String>,
    ) -> HttpRequest {
        let mut path = root.trim_end_matches('/').to_string();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        HttpRequest {
            method,
            path,
            query: self.query,
            headers,
            body,
        }
    }
}
