//! The transport collaborator seam.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round-trip.
///
/// Implementations must return non-2xx responses as [`HttpResponse`] values
/// rather than errors; [`ApiError::Transport`] is reserved for failures of
/// the round-trip itself (connect, timeout, protocol). Implementations must
/// be safe to invoke concurrently: independent traversals may run in
/// parallel against the same transport.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}
