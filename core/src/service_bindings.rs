//! Service Bindings operations (v2).

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::operations::Operations;
use crate::query::UriBuilder;
use crate::resource::Resource;
use crate::validation::{Validatable, ValidationResult};

pub type ServiceBindingResource = Resource<ServiceBindingEntity>;

/// The entity payload for Service Bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceBindingEntity {
    #[serde(rename = "app_guid")]
    pub application_id: String,
    #[serde(rename = "service_instance_guid")]
    pub service_instance_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syslog_drain_url: Option<String>,
}

/// The request payload for the Create Service Binding operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateServiceBindingRequest {
    #[serde(rename = "app_guid", skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(
        rename = "service_instance_guid",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_instance_id: Option<String>,
    /// Arbitrary parameters forwarded to the service broker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl Validatable for CreateServiceBindingRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.application_id.is_none() {
            builder.message("application id must be specified");
        }
        if self.service_instance_id.is_none() {
            builder.message("service instance id must be specified");
        }
        builder.build()
    }
}

/// The request payload for the Delete Service Binding operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteServiceBindingRequest {
    pub id: Option<String>,
}

impl Validatable for DeleteServiceBindingRequest {
    fn validate(&self) -> ValidationResult {
        let mut builder = ValidationResult::builder();
        if self.id.is_none() {
            builder.message("id must be specified");
        }
        builder.build()
    }
}

/// Client operations on Service Bindings.
pub struct ServiceBindings {
    ops: Operations,
}

impl ServiceBindings {
    pub(crate) fn new(ops: Operations) -> Self {
        Self { ops }
    }

    pub async fn create(
        &self,
        request: &CreateServiceBindingRequest,
    ) -> Result<ServiceBindingResource, ApiError> {
        let uri = UriBuilder::new().segment("v2").segment("service_bindings");
        self.ops.post(request, uri).await
    }

    pub async fn delete(&self, request: &DeleteServiceBindingRequest) -> Result<(), ApiError> {
        let uri = UriBuilder::new()
            .segment("v2")
            .segment("service_bindings")
            .segment(request.id.clone().unwrap_or_default());
        self.ops.delete(request, uri).await
    }
}
