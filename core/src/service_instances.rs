//! Service Instances operations (v2).

use futures::stream::Stream;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::operations::Operations;
use crate::pagination;
use crate::query::UriBuilder;
use crate::resource::{Page, Resource};
use crate::validation::{Validatable, ValidationResult};

pub type ServiceInstanceResource = Resource<ServiceInstanceEntity>;

/// The entity payload for Service Instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstanceEntity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
    #[serde(
        default,
        rename = "service_plan_guid",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_operation: Option<LastOperation>,
}

/// The most recent provisioning operation reported for a service instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastOperation {
    #[serde(rename = "type")]
    pub operation_type: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The request payload for the Delete Service Instance operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteServiceInstanceRequest {
    /// Allow the broker to finish deprovisioning asynchronously.
    pub accepts_incomplete: bool,
    pub id: Option<String>,
    /// Remove the instance from the database without contacting the broker.
    pub purge: bool,
}

impl Validatable for DeleteServiceInstanceRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the List Service Instances operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListServiceInstancesRequest {
    /// Filter by instance name.
    pub names: Vec<String>,
    /// Filter by containing space id.
    pub space_ids: Vec<String>,
    pub page: Option<u32>,
    pub results_per_page: Option<u32>,
}

impl Validatable for ListServiceInstancesRequest {
    fn validate(&self) -> ValidationResult {
        ValidationResult::builder().build()
    }
}

/// Client operations on Service Instances.
pub struct ServiceInstances {
    ops: Operations,
}

impl ServiceInstances {
    pub(crate) fn new(ops: Operations) -> Self {
        Self { ops }
    }

    pub async fn delete(&self, request: &DeleteServiceInstanceRequest) -> Result<(), ApiError> {
        let mut uri = UriBuilder::new()
            .segment("v2")
            .segment("service_instances")
            .segment(request.id.clone().unwrap_or_default());
        if request.accepts_incomplete {
            uri = uri.query("accepts_incomplete", "true");
        }
        if request.purge {
            uri = uri.query("purge", "true");
        }
        self.ops.delete(request, uri).await
    }

    pub async fn list(
        &self,
        request: &ListServiceInstancesRequest,
    ) -> Result<Page<ServiceInstanceResource>, ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("service_instances")
            .filter("name", &request.names)
            .filter("space_guid", &request.space_ids)
            .paged_v2(request.page, request.results_per_page);
        self.ops.get(request, uri).await
    }

    /// All service instances across every page, fetched sequentially.
    pub fn list_all(
        &self,
        request: ListServiceInstancesRequest,
    ) -> impl Stream<Item = Result<ServiceInstanceResource, ApiError>> + '_ {
        pagination::request_resources(move |page| {
            let mut request = request.clone();
            request.page = Some(page);
            async move { self.list(&request).await }
        })
    }
}
