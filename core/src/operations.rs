//! Shared request pipeline behind every resource operation.
//!
//! # Design
//! One verb helper per HTTP method, all funneling through `exchange`:
//! validate the request (fail fast, no network call on an invalid request),
//! build the transport descriptor, execute, check the operation's expected
//! status, translate non-expected responses through the error translator,
//! and deserialize the body. Expected statuses are exact because the Cloud
//! Controller's contract is exact (200 reads, 201 creates, 204 deletes).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{translate_error_response, ApiError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::UriBuilder;
use crate::transport::Transport;
use crate::validation::{Status, Validatable};

#[derive(Clone)]
pub(crate) struct Operations {
    transport: Arc<dyn Transport>,
    root: String,
}

impl Operations {
    pub(crate) fn new(transport: Arc<dyn Transport>, root: &str) -> Self {
        Self {
            transport,
            root: root.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        request: &impl Validatable,
        uri: UriBuilder,
    ) -> Result<T, ApiError> {
        validate(request)?;
        let http = uri.into_request(HttpMethod::Get, &self.root, None);
        parse_body(self.exchange(http, 200).await?)
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        request: &(impl Validatable + Serialize),
        uri: UriBuilder,
    ) -> Result<T, ApiError> {
        validate(request)?;
        let body = serialize_body(request)?;
        let http = uri.into_request(HttpMethod::Post, &self.root, Some(body));
        parse_body(self.exchange(http, 201).await?)
    }

    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        request: &(impl Validatable + Serialize),
        uri: UriBuilder,
        expected: u16,
    ) -> Result<T, ApiError> {
        validate(request)?;
        let body = serialize_body(request)?;
        let http = uri.into_request(HttpMethod::Put, &self.root, Some(body));
        parse_body(self.exchange(http, expected).await?)
    }

    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        request: &(impl Validatable + Serialize),
        uri: UriBuilder,
    ) -> Result<T, ApiError> {
        validate(request)?;
        let body = serialize_body(request)?;
        let http = uri.into_request(HttpMethod::Patch, &self.root, Some(body));
        parse_body(self.exchange(http, 200).await?)
    }

    pub(crate) async fn delete(
        &self,
        request: &impl Validatable,
        uri: UriBuilder,
    ) -> Result<(), ApiError> {
        validate(request)?;
        let http = uri.into_request(HttpMethod::Delete, &self.root, None);
        self.exchange(http, 204).await?;
        Ok(())
    }

    async fn exchange(
        &self,
        request: HttpRequest,
        expected: u16,
    ) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = ?request.method, path = %request.path, "issuing request");
        let response = self.transport.execute(request).await?;
        if response.status != expected {
            tracing::debug!(status = response.status, "translating error response");
            return Err(translate_error_response(response.status, response.body));
        }
        Ok(response)
    }
}

fn validate(request: &impl Validatable) -> Result<(), ApiError> {
    let result = request.validate();
    if result.status() == Status::Invalid {
        return Err(ApiError::InvalidRequest(result.into_messages()));
    }
    Ok(())
}

fn serialize_body(request: &impl Serialize) -> Result<String, ApiError> {
    serde_json::to_string(request).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn parse_body<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
