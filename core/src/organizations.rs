//! Organizations operations (v2).

use futures::stream::Stream;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::operations::Operations;
use crate::pagination;
use crate::query::UriBuilder;
use crate::resource::{Page, Resource};
use crate::validation::{Validatable, ValidationResult};

pub type OrganizationResource = Resource<OrganizationEntity>;

/// The entity payload for Organizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationEntity {
    pub name: String,
    #[serde(default)]
    pub billing_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// The request payload for the Associate User with the Organization operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssociateOrganizationUserRequest {
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(skip)]
    pub user_id: Option<String>,
}

impl Validatable for AssociateOrganizationUserRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        if self.user_id.is_none() {
            builder.message("user id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the List Organizations operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOrganizationsRequest {
    /// Filter by organization name.
    pub names: Vec<String>,
    pub page: Option<u32>,
    pub results_per_page: Option<u32>,
}

impl Validatable for ListOrganizationsRequest {
    fn validate(&self) -> ValidationResult {
        ValidationResult::builder().build()
    }
}

/// Client operations on Organizations.
pub struct Organizations {
    ops: Operations,
}

impl Organizations {
    pub(crate) fn new(ops: Operations) -> Self {
        Self { ops }
    }

    pub async fn associate_user(
        &self,
        request: &AssociateOrganizationUserRequest,
    ) -> Result<OrganizationResource, ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("organizations")
            .segment(request.id.clone().unwrap_or_default())
            .segment("users")
            .segment(request.user_id.clone().unwrap_or_default());
        self.ops.put(request, uri, 201).await
    }

    pub async fn list(
        &self,
        request: &ListOrganizationsRequest,
    ) -> Result<Page<OrganizationResource>, ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("organizations")
            .filter("name", &request.names)
            .paged_v2(request.page, request.results_per_page);
        self.ops.get(request, uri).await
    }

    /// All organizations across every page, fetched sequentially.
    pub fn list_all(
        &self,
        request: ListOrganizationsRequest,
    ) -> impl Stream<Item = Result<OrganizationResource, ApiError>> + '_ {
        pagination::request_resources(move |page| {
            let mut request = request.clone();
            request.page = Some(page);
            async move { self.list(&request).await }
        })
    }
}
