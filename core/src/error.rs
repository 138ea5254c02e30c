//! Error types for the client.
//!
//! # Design
//! The Cloud Controller reports failures as a JSON body carrying a numeric
//! `code`, a human `description`, and a symbolic `error_code`. Non-2xx
//! responses are translated into [`CloudFoundryError`] with those three
//! fields, keeping the raw HTTP failure as the source for diagnostics. A
//! body that does not carry the expected shape becomes
//! [`ApiError::MalformedErrorPayload`] instead of a half-populated domain
//! error. Validation failures never reach the network: they surface as
//! [`ApiError::InvalidRequest`] with the collected messages.

use std::collections::HashMap;

use thiserror::Error;

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request failed validation; no HTTP request was issued.
    #[error("invalid request: {}", .0.join(", "))]
    InvalidRequest(Vec<String>),

    /// The server reported a structured Cloud Foundry error.
    #[error(transparent)]
    CloudFoundry(#[from] CloudFoundryError),

    /// The server returned a non-2xx status with a body that does not have
    /// the expected `code`/`description`/`error_code` shape.
    #[error("malformed error payload for HTTP {status}: {body}")]
    MalformedErrorPayload { status: u16, body: String },

    /// The HTTP round-trip itself failed (connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

/// A structured error reported by the Cloud Controller.
#[derive(Debug, Error)]
#[error("{error_code} ({code}): {description}")]
pub struct CloudFoundryError {
    /// Server-reported numeric code, e.g. `10000`.
    pub code: i64,
    /// Human-readable description.
    pub description: String,
    /// Symbolic error code, e.g. `CF-NotFound`.
    pub error_code: String,
    /// The underlying HTTP failure.
    #[source]
    pub cause: RequestFailed,
}

/// The raw non-2xx HTTP response that caused a domain error.
#[derive(Debug, Clone, Error)]
#[error("HTTP {status}: {body}")]
pub struct RequestFailed {
    pub status: u16,
    pub body: String,
}

/// Translate a non-2xx response into a domain error.
///
/// The body is parsed as a generic key-value map; `code`, `description` and
/// `error_code` must all be present with their expected types, otherwise the
/// payload is reported as malformed.
pub fn translate_error_response(status: u16, body: String) -> ApiError {
    let parsed: Result<HashMap<String, serde_json::Value>, _> = serde_json::from_str(&body);
    let Ok(fields) = parsed else {
        return ApiError::MalformedErrorPayload { status, body };
    };

    let code = fields.get("code").and_then(serde_json::Value::as_i64);
    let description = fields
        .get("description")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);
    let error_code = fields
        .get("error_code")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);

    match (code, description, error_code) {
        (Some(code), Some(description), Some(error_code)) => {
            ApiError::CloudFoundry(CloudFoundryError {
                code,
                description,
                error_code,
                cause: RequestFailed { status, body },
            })
        }
        _ => ApiError::MalformedErrorPayload { status, body },
    }
}
