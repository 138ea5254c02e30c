//! Shared Domains operations (v2).

use futures::stream::Stream;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::operations::Operations;
use crate::pagination;
use crate::query::UriBuilder;
use crate::resource::{Page, Resource};
use crate::validation::{Validatable, ValidationResult};

pub type SharedDomainResource = Resource<SharedDomainEntity>;

/// The entity payload for Shared Domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedDomainEntity {
    pub name: String,
    #[serde(
        default,
        rename = "router_group_guid",
        skip_serializing_if = "Option::is_none"
    )]
    pub router_group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router_group_type: Option<String>,
}

/// The request payload for the List Shared Domains operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListSharedDomainsRequest {
    /// Filter by domain name.
    pub names: Vec<String>,
    pub page: Option<u32>,
    pub results_per_page: Option<u32>,
}

impl Validatable for ListSharedDomainsRequest {
    fn validate(&self) -> ValidationResult {
        ValidationResult::builder().build()
    }
}

/// Client operations on Shared Domains.
pub struct SharedDomains {
    ops: Operations,
}

impl SharedDomains {
    pub(crate) fn new(ops: Operations) -> Self {
        Self { ops }
    }

    pub async fn list(
        &self,
        request: &ListSharedDomainsRequest,
    ) -> Result<Page<SharedDomainResource>, ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("shared_domains")
            .filter("name", &request.names)
            .paged_v2(request.page, request.results_per_page);
        self.ops.get(request, uri).await
    }

    /// All shared domains across every page, fetched sequentially.
    pub fn list_all(
        &self,
        request: ListSharedDomainsRequest,
    ) -> impl Stream<Item = Result<SharedDomainResource, ApiError>> + '_ {
        pagination::request_resources(move |page| {
            let mut request = request.clone();
            request.page = Some(page);
            async move { self.list(&request).await }
        })
    }
}
