//! Applications operations (v3).

use std::collections::HashMap;

use futures::stream::Stream;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ApiError;
use crate::operations::Operations;
use crate::pagination;
use crate::query::UriBuilder;
use crate::resource::PagedResources;
use crate::validation::{Validatable, ValidationResult};

/// An application resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "guid")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// The request payload for the Create Application operation.
///
/// The target space travels in the body as the nested
/// `relationships.space.guid` structure the v3 API expects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateApplicationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildpack: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub environment_variables: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        rename = "relationships",
        serialize_with = "space_relationship",
        skip_serializing_if = "Option::is_none"
    )]
    pub space_id: Option<String>,
}

/// Renders the space id as `{"space": {"guid": <id>}}`. Only invoked with a
/// set id; the field is skipped when unset.
fn space_relationship<S: Serializer>(
    space_id: &Option<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let guid = serde_json::json!({ "guid": space_id });
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("space", &guid)?;
    map.end()
}

impl Validatable for CreateApplicationRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.name.is_none() {
            builder.message("name must be specified");
        }
        if self.space_id.is_none() {
            builder.message("relationship space id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the List Applications operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListApplicationsRequest {
    /// Filter by application name.
    pub names: Vec<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl Validatable for ListApplicationsRequest {
    fn validate(&self) -> ValidationResult {
        ValidationResult::builder().build()
    }
}

/// Client operations on Applications.
pub struct Applications {
    ops: Operations,
}

impl Applications {
    pub(crate) fn new(ops: Operations) -> Self {
        Self { ops }
    }

    pub async fn create(&self, request: &CreateApplicationRequest) -> Result<Application, ApiError> {
        let uri = UriBuilder::new().segment("v3").segment("apps");
        self.ops.post(request, uri).await
    }

    pub async fn list(
        &self,
        request: &ListApplicationsRequest,
    ) -> Result<PagedResources<Application>, ApiError> {
        let mut uri = UriBuilder::new()
            .segment("v3")
            .segment("apps")
            .paged_v3(request.page, request.per_page);
        if !request.names.is_empty() {
            uri = uri.query("names", request.names.join(","));
        }
        self.ops.get(request, uri).await
    }

    /// All applications across every page, fetched sequentially.
    pub fn list_all(
        &self,
        request: ListApplicationsRequest,
    ) -> impl Stream<Item = Result<Application, ApiError>> + '_ {
        pagination::request_resources(move |page| {
            let mut request = request.clone();
            request.page = Some(page);
            async move { self.list(&request).await }
        })
    }
}
