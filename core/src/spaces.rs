//! Spaces operations (v2).

use futures::stream::Stream;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::operations::Operations;
use crate::pagination;
use crate::query::UriBuilder;
use crate::resource::{Page, Resource};
use crate::validation::{Validatable, ValidationResult};

pub type SpaceResource = Resource<SpaceEntity>;

/// The entity payload for Spaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceEntity {
    pub name: String,
    #[serde(rename = "organization_guid")]
    pub organization_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_ssh: Option<bool>,
}

/// The request payload for the Create Space operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateSpaceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "organization_guid", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
}

impl Validatable for CreateSpaceRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.name.is_none() {
            builder.message("name must be specified");
        }
        if self.organization_id.is_none() {
            builder.message("organization id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the Get Space operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetSpaceRequest {
    pub id: Option<String>,
}

impl Validatable for GetSpaceRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the Associate Auditor with the Space operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssociateSpaceAuditorRequest {
    /// Carried in the path, not the body.
    #[serde(skip)]
    pub auditor_id: Option<String>,
    #[serde(skip)]
    pub id: Option<String>,
}

impl Validatable for AssociateSpaceAuditorRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.auditor_id.is_none() {
            builder.message("auditor id must be specified");
        }
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the Remove Auditor from the Space operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoveSpaceAuditorRequest {
    pub auditor_id: Option<String>,
    pub id: Option<String>,
}

impl Validatable for RemoveSpaceAuditorRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.auditor_id.is_none() {
            builder.message("auditor id must be specified");
        }
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the List Spaces operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSpacesRequest {
    /// Filter by space name.
    pub names: Vec<String>,
    /// Filter by owning organization id.
    pub organization_ids: Vec<String>,
    pub page: Option<u32>,
    pub results_per_page: Option<u32>,
}

impl Validatable for ListSpacesRequest {
    fn validate(&self) -> ValidationResult {
        ValidationResult::builder().build()
    }
}

/// Client operations on Spaces.
pub struct Spaces {
    ops: Operations,
}

impl Spaces {
    pub(crate) fn new(ops: Operations) -> Self {
        Self { ops }
    }

    pub async fn create(&self, request: &CreateSpaceRequest) -> Result<SpaceResource, ApiError> {
        let uri = UriBuilder::new().segment("v2").segment("spaces");
        self.ops.post(request, uri).await
    }

    pub async fn get(&self, request: &GetSpaceRequest) -> Result<SpaceResource, ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("spaces")
            .segment(request.id.clone().unwrap_or_default());
        self.ops.get(request, uri).await
    }

    pub async fn associate_auditor(
        &self,
        request: &AssociateSpaceAuditorRequest,
    ) -> Result<SpaceResource, ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("spaces")
            .segment(request.id.clone().unwrap_or_default())
            .segment("auditors")
            .segment(request.auditor_id.clone().unwrap_or_default());
        self.ops.put(request, uri, 201).await
    }

    pub async fn remove_auditor(
        &self,
        request: &RemoveSpaceAuditorRequest,
    ) -> Result<(), ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("spaces")
            .segment(request.id.clone().unwrap_or_default())
            .segment("auditors")
            .segment(request.auditor_id.clone().unwrap_or_default());
        self.ops.delete(request, uri).await
    }

    pub async fn list(&self, request: &ListSpacesRequest) -> Result<Page<SpaceResource>, ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("spaces")
            .filter("name", &request.names)
            .filter("organization_guid", &request.organization_ids)
            .paged_v2(request.page, request.results_per_page);
        self.ops.get(request, uri).await
    }

    /// All spaces across every page, fetched sequentially.
    pub fn list_all(
        &self,
        request: ListSpacesRequest,
    ) -> impl Stream<Item = Result<SpaceResource, ApiError>> + '_ {
        pagination::request_resources(move |page| {
            let mut request = request.clone();
            request.page = Some(page);
            async move { self.list(&request).await }
        })
    }
}
