//! Users operations (v2).

use futures::stream::Stream;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::operations::Operations;
use crate::pagination;
use crate::query::UriBuilder;
use crate::resource::{Page, Resource};
use crate::validation::{Validatable, ValidationResult};

pub type UserResource = Resource<UserEntity>;

/// The entity payload for Users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserEntity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(
        default,
        rename = "default_space_guid",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_space_id: Option<String>,
}

/// The request payload for the List Users operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListUsersRequest {
    /// Filter by organization membership.
    pub organization_ids: Vec<String>,
    pub page: Option<u32>,
    pub results_per_page: Option<u32>,
}

impl Validatable for ListUsersRequest {
    fn validate(&self) -> ValidationResult {
        ValidationResult::builder().build()
    }
}

/// Client operations on Users.
pub struct Users {
    ops: Operations,
}

impl Users {
    pub(crate) fn new(ops: Operations) -> Self {
        Self { ops }
    }

    pub async fn list(&self, request: &ListUsersRequest) -> Result<Page<UserResource>, ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("users")
            .filter("organization_guid", &request.organization_ids)
            .paged_v2(request.page, request.results_per_page);
        self.ops.get(request, uri).await
    }

    /// All users across every page, fetched sequentially. Selection such as
    /// finding one user by name composes on top with stream combinators.
    pub fn list_all(
        &self,
        request: ListUsersRequest,
    ) -> impl Stream<Item = Result<UserResource, ApiError>> + '_ {
        pagination::request_resources(move |page| {
            let mut request = request.clone();
            request.page = Some(page);
            async move { self.list(&request).await }
        })
    }
}
