//! End-to-end tests against the live mock Cloud Controller.
//!
//! # Design
//! Each test starts the mock server on a random port and drives the client
//! over real HTTP with a reqwest-backed [`Transport`], validating request
//! building, validation fail-fast, pagination traversal, and error
//! translation end to end.

use std::sync::Arc;

use async_trait::async_trait;
use cf_client::applications::CreateApplicationRequest;
use cf_client::organizations::AssociateOrganizationUserRequest;
use cf_client::processes::{
    DeleteProcessInstanceRequest, GetProcessRequest, ListProcessesRequest, ScaleProcessRequest,
    UpdateProcessRequest,
};
use cf_client::service_bindings::CreateServiceBindingRequest;
use cf_client::service_instances::DeleteServiceInstanceRequest;
use cf_client::shared_domains::ListSharedDomainsRequest;
use cf_client::spaces::{
    AssociateSpaceAuditorRequest, CreateSpaceRequest, GetSpaceRequest, RemoveSpaceAuditorRequest,
};
use cf_client::users::ListUsersRequest;
use cf_client::info::GetInfoRequest;
use cf_client::{
    ApiError, CloudFoundryClient, HttpMethod, HttpRequest, HttpResponse, Transport,
};
use futures::future;
use futures::stream::TryStreamExt;

struct ReqwestTransport {
    client: reqwest::Client,
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self
            .client
            .request(method, &request.path)
            .query(&request.query);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

/// Start the mock server on a random port and return a client bound to it.
async fn start_client() -> CloudFoundryClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));

    let transport = ReqwestTransport {
        client: reqwest::Client::new(),
    };
    CloudFoundryClient::new(Arc::new(transport), &format!("http://{addr}"))
}

/// Find a user's id by username, composed on top of the traversal stream.
async fn user_id_by_username(client: &CloudFoundryClient, username: &str) -> String {
    let mut matches = std::pin::pin!(client
        .users()
        .list_all(ListUsersRequest {
            results_per_page: Some(2),
            ..Default::default()
        })
        .try_filter(|user| future::ready(user.entity().username.as_deref() == Some(username))));
    matches
        .try_next()
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("user {username} not found"))
        .id()
        .to_string()
}

#[tokio::test]
async fn info_round_trip() {
    let client = start_client().await;
    let info = client.info().get(&GetInfoRequest::default()).await.unwrap();
    assert_eq!(info.name, "mock-cloud-controller");
    assert_eq!(info.api_version, "2.44.0");
}

#[tokio::test]
async fn users_traverse_all_pages_in_order() {
    let client = start_client().await;

    let usernames: Vec<String> = client
        .users()
        .list_all(ListUsersRequest {
            results_per_page: Some(2),
            ..Default::default()
        })
        .map_ok(|user| user.into_entity().username.unwrap_or_default())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(usernames, mock_server::SEEDED_USERNAMES);
}

#[tokio::test]
async fn shared_domains_list_all_pages() {
    let client = start_client().await;

    let names: Vec<String> = client
        .shared_domains()
        .list_all(ListSharedDomainsRequest {
            results_per_page: Some(1),
            ..Default::default()
        })
        .map_ok(|domain| domain.into_entity().name)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(names, mock_server::SEEDED_SHARED_DOMAINS);
}

#[tokio::test]
async fn space_lifecycle_with_auditor() {
    let client = start_client().await;

    let space = client
        .spaces()
        .create(&CreateSpaceRequest {
            name: Some("test-new-space-name".to_string()),
            organization_id: Some("test-organization-id".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(space.entity().name, "test-new-space-name");
    let space_id = space.id().to_string();

    let fetched = client
        .spaces()
        .get(&GetSpaceRequest {
            id: Some(space_id.clone()),
        })
        .await
        .unwrap();
    assert_eq!(fetched.entity(), space.entity());

    let auditor_id = user_id_by_username(&client, "dave").await;

    client
        .spaces()
        .associate_auditor(&AssociateSpaceAuditorRequest {
            auditor_id: Some(auditor_id.clone()),
            id: Some(space_id.clone()),
        })
        .await
        .unwrap();

    client
        .spaces()
        .remove_auditor(&RemoveSpaceAuditorRequest {
            auditor_id: Some(auditor_id.clone()),
            id: Some(space_id.clone()),
        })
        .await
        .unwrap();

    // Removing again reports the structured not-found error.
    let err = client
        .spaces()
        .remove_auditor(&RemoveSpaceAuditorRequest {
            auditor_id: Some(auditor_id),
            id: Some(space_id),
        })
        .await
        .unwrap_err();
    let ApiError::CloudFoundry(cf) = err else {
        panic!("expected CloudFoundry error, got {err:?}");
    };
    assert_eq!(cf.error_code, "CF-NotFound");
}

#[tokio::test]
async fn unknown_space_translates_to_domain_error() {
    let client = start_client().await;

    let err = client
        .spaces()
        .get(&GetSpaceRequest {
            id: Some("no-such-space".to_string()),
        })
        .await
        .unwrap_err();

    let ApiError::CloudFoundry(cf) = err else {
        panic!("expected CloudFoundry error, got {err:?}");
    };
    assert_eq!(cf.code, 10000);
    assert_eq!(cf.error_code, "CF-NotFound");
    assert_eq!(cf.cause.status, 404);
}

#[tokio::test]
async fn invalid_request_fails_before_the_network() {
    let client = start_client().await;

    let err = client
        .spaces()
        .get(&GetSpaceRequest::default())
        .await
        .unwrap_err();

    let ApiError::InvalidRequest(messages) = err else {
        panic!("expected InvalidRequest, got {err:?}");
    };
    assert_eq!(messages, ["id must be specified"]);
}

#[tokio::test]
async fn service_instance_delete_honors_flags() {
    let client = start_client().await;

    client
        .service_instances()
        .delete(&DeleteServiceInstanceRequest {
            accepts_incomplete: true,
            id: Some(mock_server::SEEDED_SERVICE_INSTANCE_ID.to_string()),
            purge: true,
        })
        .await
        .unwrap();

    let err = client
        .service_instances()
        .delete(&DeleteServiceInstanceRequest {
            id: Some(mock_server::SEEDED_SERVICE_INSTANCE_ID.to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::CloudFoundry(_)));
}

#[tokio::test]
async fn service_binding_create() {
    let client = start_client().await;

    let app = client
        .applications()
        .create(&CreateApplicationRequest {
            name: Some("test-app".to_string()),
            space_id: Some("test-space-id".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let binding = client
        .service_bindings()
        .create(&CreateServiceBindingRequest {
            application_id: Some(app.id.clone()),
            service_instance_id: Some(mock_server::SEEDED_SERVICE_INSTANCE_ID.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(binding.entity().application_id, app.id);
    assert_eq!(
        binding.entity().service_instance_id,
        mock_server::SEEDED_SERVICE_INSTANCE_ID
    );
}

#[tokio::test]
async fn organization_user_association() {
    let client = start_client().await;
    let user_id = user_id_by_username(&client, "alice").await;

    let organization = client
        .organizations()
        .associate_user(&AssociateOrganizationUserRequest {
            id: Some("test-organization-id".to_string()),
            user_id: Some(user_id),
        })
        .await
        .unwrap();
    assert_eq!(organization.id(), "test-organization-id");

    let err = client
        .organizations()
        .associate_user(&AssociateOrganizationUserRequest {
            id: Some("test-organization-id".to_string()),
            user_id: Some("no-such-user".to_string()),
        })
        .await
        .unwrap_err();
    let ApiError::CloudFoundry(cf) = err else {
        panic!("expected CloudFoundry error, got {err:?}");
    };
    assert_eq!(cf.error_code, "CF-NotFound");
}

#[tokio::test]
async fn process_lifecycle() {
    let client = start_client().await;

    let processes: Vec<_> = client
        .processes()
        .list_all(ListProcessesRequest {
            per_page: Some(2),
            ..Default::default()
        })
        .try_collect()
        .await
        .unwrap();
    assert_eq!(processes.len(), 3);

    let id = processes[0].id.clone();
    let fetched = client
        .processes()
        .get(&GetProcessRequest {
            id: Some(id.clone()),
        })
        .await
        .unwrap();
    assert_eq!(fetched, processes[0]);

    let scaled = client
        .processes()
        .scale(&ScaleProcessRequest {
            id: Some(id.clone()),
            instances: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(scaled.instances, 5);

    client
        .processes()
        .update(&UpdateProcessRequest {
            id: Some(id.clone()),
            command: Some("rackup".to_string()),
        })
        .await
        .unwrap();

    client
        .processes()
        .delete_instance(&DeleteProcessInstanceRequest {
            id: Some(id),
            index: Some("0".to_string()),
        })
        .await
        .unwrap();
}
