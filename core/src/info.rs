//! Info operation (v2).

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::operations::Operations;
use crate::query::UriBuilder;
use crate::validation::{Validatable, ValidationResult};

/// The request payload for the Get Info operation. It has no required
/// fields and is always valid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetInfoRequest {}

impl Validatable for GetInfoRequest {
    fn validate(&self) -> ValidationResult {
        ValidationResult::builder().build()
    }
}

/// The response payload for the Get Info operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetInfoResponse {
    pub name: String,
    pub api_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging_endpoint: Option<String>,
}

/// Client operations on Info.
pub struct Info {
    ops: Operations,
}

impl Info {
    pub(crate) fn new(ops: Operations) -> Self {
        Self { ops }
    }

    pub async fn get(&self, request: &GetInfoRequest) -> Result<GetInfoResponse, ApiError> {
        let uri = UriBuilder::new().segment("v2").segment("info");
        self.ops.get(request, uri).await
    }
}
