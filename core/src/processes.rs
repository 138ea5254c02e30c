//! Processes operations (v3).
//!
//! v3 resources are flat (no `metadata`/`entity` split) and list responses
//! carry a nested `pagination` block.

use futures::stream::Stream;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::operations::Operations;
use crate::pagination;
use crate::query::UriBuilder;
use crate::resource::PagedResources;
use crate::validation::{Validatable, ValidationResult};

/// A process resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    #[serde(rename = "guid")]
    pub id: String,
    #[serde(rename = "type")]
    pub process_type: String,
    pub instances: u32,
    pub memory_in_mb: u32,
    pub disk_in_mb: u32,
}

/// The request payload for the Get Process operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetProcessRequest {
    pub id: Option<String>,
}

impl Validatable for GetProcessRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the Scale Process operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScaleProcessRequest {
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_in_mb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_in_mb: Option<u32>,
}

impl Validatable for ScaleProcessRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the Update Process operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateProcessRequest {
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl Validatable for UpdateProcessRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the Delete Process Instance operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteProcessInstanceRequest {
    pub id: Option<String>,
    /// The 0-based instance index to terminate.
    pub index: Option<String>,
}

impl Validatable for DeleteProcessInstanceRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        if self.index.is_none() {
            builder.message("index must be specified");
        }
        builder.build()
    }
}

/// The request payload for the List Processes operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProcessesRequest {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Validatable for ListProcessesRequest {
    fn validate(&self) -> ValidationResult {
        ValidationResult::builder().build()
    }
}

/// Client operations on Processes.
pub struct Processes {
    ops: Operations,
}

impl Processes {
    pub(crate) fn new(ops: Operations) -> Self {
        Self { ops }
    }

    pub async fn get(&self, request: &GetProcessRequest) -> Result<Process, ApiError> {
        let uri = UriBuilder::new()
            .segment("v3")
            .segment("processes")
            .segment(request.id.clone().unwrap_or_default());
        self.ops.get(request, uri).await
    }

    pub async fn scale(&self, request: &ScaleProcessRequest) -> Result<Process, ApiError> {
        let uri = UriBuilder::new()
            .segment("v3")
            .segment("processes")
            .segment(request.id.clone().unwrap_or_default())
            .segment("scale");
        self.ops.put(request, uri, 200).await
    }

    pub async fn update(&self, request: &UpdateProcessRequest) -> Result<Process, ApiError> {
        let uri = UriBuilder::new()
            .segment("v3")
            .segment("processes")
            .segment(request.id.clone().unwrap_or_default());
        self.ops.patch(request, uri).await
    }

    pub async fn delete_instance(
        &self,
        request: &DeleteProcessInstanceRequest,
    ) -> Result<(), ApiError> {
        let uri = UriBuilder::new()
            .segment("v3")
            .segment("processes")
            .segment(request.id.clone().unwrap_or_default())
            .segment("instances")
            .segment(request.index.clone().unwrap_or_default());
        self.ops.delete(request, uri).await
    }

    pub async fn list(
        &self,
        request: &ListProcessesRequest,
    ) -> Result<PagedResources<Process>, ApiError> {
        let uri = UriBuilder::new()
            .segment("v3")
            .segment("processes")
            .paged_v3(request.page, request.per_page);
        self.ops.get(request, uri).await
    }

    /// All processes across every page, fetched sequentially.
    pub fn list_all(
        &self,
        request: ListProcessesRequest,
    ) -> impl Stream<Item = Result<Process, ApiError>> + '_ {
        pagination::request_resources(move |page| {
            let mut request = request.clone();
            request.page = Some(page);
            async move { self.list(&request).await }
        })
    }
}
