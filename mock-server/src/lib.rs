//! In-memory mock of a Cloud Foundry-style Cloud Controller.
//!
//! # Design
//! Serves just enough of the v2/v3 surface for the client integration tests:
//! paginated user and shared domain listing, space CRUD with auditor
//! association, service instance deletion, service binding creation, and v3
//! process/application operations. Unknown ids produce the Cloud Controller's structured error
//! body (`code`/`description`/`error_code`) with a 404 status. Users,
//! processes and one service instance are seeded at startup so read-side
//! tests have data without a write API for those kinds.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Usernames seeded into `/v2/users`, in listing order.
pub const SEEDED_USERNAMES: [&str; 5] = ["alice", "bob", "carol", "dave", "erin"];

/// Id of the service instance seeded for deletion tests.
pub const SEEDED_SERVICE_INSTANCE_ID: &str = "11111111-1111-1111-1111-111111111111";

/// Domain names seeded into `/v2/shared_domains`, in listing order.
pub const SEEDED_SHARED_DOMAINS: [&str; 2] = ["apps.example.com", "tcp.example.com"];

#[derive(Clone, Debug, Serialize)]
struct User {
    guid: String,
    username: String,
}

#[derive(Clone, Debug)]
struct Space {
    name: String,
    organization_id: String,
    auditors: HashSet<String>,
}

#[derive(Clone, Debug, Serialize)]
struct Process {
    guid: String,
    #[serde(rename = "type")]
    process_type: String,
    instances: u32,
    memory_in_mb: u32,
    disk_in_mb: u32,
}

#[derive(Clone, Debug, Serialize)]
struct App {
    guid: String,
    name: String,
    state: String,
}

struct AppState {
    users: Vec<User>,
    spaces: RwLock<HashMap<String, Space>>,
    service_instances: RwLock<HashSet<String>>,
    processes: RwLock<HashMap<String, Process>>,
    apps: RwLock<HashMap<String, App>>,
}

type Db = Arc<AppState>;

pub fn app() -> Router {
    let users = SEEDED_USERNAMES
        .iter()
        .map(|username| User {
            guid: Uuid::new_v4().to_string(),
            username: (*username).to_string(),
        })
        .collect();

    let processes = ["web", "worker", "clock"]
        .iter()
        .enumerate()
        .map(|(i, process_type)| {
            let guid = Uuid::new_v4().to_string();
            (
                guid.clone(),
                Process {
                    guid,
                    process_type: (*process_type).to_string(),
                    instances: i as u32 + 1,
                    memory_in_mb: 256,
                    disk_in_mb: 1024,
                },
            )
        })
        .collect();

    let state: Db = Arc::new(AppState {
        users,
        spaces: RwLock::new(HashMap::new()),
        service_instances: RwLock::new(HashSet::from([SEEDED_SERVICE_INSTANCE_ID.to_string()])),
        processes: RwLock::new(processes),
        apps: RwLock::new(HashMap::new()),
    });

    Router::new()
        .route("/v2/info", get(get_info))
        .route("/v2/users", get(list_users))
        .route("/v2/spaces", post(create_space))
        .route("/v2/spaces/{id}", get(get_space))
        .route(
            "/v2/spaces/{id}/auditors/{auditor_id}",
            axum::routing::put(associate_auditor).delete(remove_auditor),
        )
        .route(
            "/v2/organizations/{id}/users/{user_id}",
            axum::routing::put(associate_organization_user),
        )
        .route("/v2/shared_domains", get(list_shared_domains))
        .route("/v2/service_instances/{id}", delete(delete_service_instance))
        .route("/v2/service_bindings", post(create_service_binding))
        .route("/v3/processes", get(list_processes))
        .route(
            "/v3/processes/{id}",
            get(get_process).patch(update_process),
        )
        .route("/v3/processes/{id}/scale", axum::routing::put(scale_process))
        .route(
            "/v3/processes/{id}/instances/{index}",
            delete(delete_process_instance),
        )
        .route("/v3/apps", get(list_apps).post(create_app))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found(description: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": 10000,
            "description": description,
            "error_code": "CF-NotFound"
        })),
    )
}

fn v2_resource(guid: &str, entity: Value) -> Value {
    json!({
        "metadata": {
            "guid": guid,
            "url": format!("/v2/resource/{guid}"),
            "created_at": "2016-01-26T22:20:04Z",
            "updated_at": null
        },
        "entity": entity
    })
}

fn v2_page(page: u32, per_page: u32, all: Vec<Value>) -> Value {
    let total_results = all.len() as u32;
    let total_pages = total_results.div_ceil(per_page);
    let start = ((page - 1) * per_page) as usize;
    let resources: Vec<Value> = all.into_iter().skip(start).take(per_page as usize).collect();
    json!({
        "total_results": total_results,
        "total_pages": total_pages,
        "prev_url": null,
        "next_url": null,
        "resources": resources
    })
}

fn v3_page(page: u32, per_page: u32, all: Vec<Value>) -> Value {
    let total_results = all.len() as u32;
    let total_pages = total_results.div_ceil(per_page);
    let start = ((page - 1) * per_page) as usize;
    let resources: Vec<Value> = all.into_iter().skip(start).take(per_page as usize).collect();
    json!({
        "pagination": {
            "total_results": total_results,
            "total_pages": total_pages
        },
        "resources": resources
    })
}

fn page_params(params: &HashMap<String, String>, per_page_key: &str) -> (u32, u32) {
    let page = params
        .get("page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1u32)
        .max(1);
    let per_page = params
        .get(per_page_key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(50u32)
        .max(1);
    (page, per_page)
}

async fn get_info() -> Json<Value> {
    Json(json!({
        "name": "mock-cloud-controller",
        "api_version": "2.44.0",
        "authorization_endpoint": "http://localhost/uaa"
    }))
}

async fn list_users(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let (page, per_page) = page_params(&params, "results-per-page");
    let all = db
        .users
        .iter()
        .map(|user| {
            v2_resource(
                &user.guid,
                json!({"username": user.username, "admin": false, "active": true}),
            )
        })
        .collect();
    Json(v2_page(page, per_page, all))
}

async fn list_shared_domains(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let (page, per_page) = page_params(&params, "results-per-page");
    let all = SEEDED_SHARED_DOMAINS
        .iter()
        .map(|name| {
            v2_resource(
                &Uuid::new_v4().to_string(),
                json!({"name": name, "router_group_guid": null, "router_group_type": null}),
            )
        })
        .collect();
    Json(v2_page(page, per_page, all))
}

#[derive(Deserialize)]
struct CreateSpace {
    name: String,
    organization_guid: String,
}

async fn create_space(
    State(db): State<Db>,
    Json(input): Json<CreateSpace>,
) -> (StatusCode, Json<Value>) {
    let guid = Uuid::new_v4().to_string();
    let space = Space {
        name: input.name.clone(),
        organization_id: input.organization_guid.clone(),
        auditors: HashSet::new(),
    };
    db.spaces.write().await.insert(guid.clone(), space);
    let entity = json!({
        "name": input.name,
        "organization_guid": input.organization_guid,
        "allow_ssh": true
    });
    (StatusCode::CREATED, Json(v2_resource(&guid, entity)))
}

fn space_entity(space: &Space) -> Value {
    json!({
        "name": space.name,
        "organization_guid": space.organization_id,
        "allow_ssh": true
    })
}

async fn get_space(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let spaces = db.spaces.read().await;
    let space = spaces
        .get(&id)
        .ok_or_else(|| not_found(&format!("The app space could not be found: {id}")))?;
    Ok(Json(v2_resource(&id, space_entity(space))))
}

async fn associate_auditor(
    State(db): State<Db>,
    Path((id, auditor_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let mut spaces = db.spaces.write().await;
    let space = spaces
        .get_mut(&id)
        .ok_or_else(|| not_found(&format!("The app space could not be found: {id}")))?;
    space.auditors.insert(auditor_id);
    let body = v2_resource(&id, space_entity(space));
    Ok((StatusCode::CREATED, Json(body)))
}

async fn remove_auditor(
    State(db): State<Db>,
    Path((id, auditor_id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut spaces = db.spaces.write().await;
    let space = spaces
        .get_mut(&id)
        .ok_or_else(|| not_found(&format!("The app space could not be found: {id}")))?;
    if !space.auditors.remove(&auditor_id) {
        return Err(not_found(&format!(
            "The user could not be found: {auditor_id}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn associate_organization_user(
    State(db): State<Db>,
    Path((id, user_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    if !db.users.iter().any(|user| user.guid == user_id) {
        return Err(not_found(&format!("The user could not be found: {user_id}")));
    }
    let entity = json!({
        "name": "seeded-organization",
        "billing_enabled": false,
        "status": "active"
    });
    Ok((StatusCode::CREATED, Json(v2_resource(&id, entity))))
}

async fn delete_service_instance(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let mut instances = db.service_instances.write().await;
    if !instances.remove(&id) {
        return Err(not_found(&format!(
            "The service instance could not be found: {id}"
        )));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct CreateServiceBinding {
    app_guid: String,
    service_instance_guid: String,
}

async fn create_service_binding(
    Json(input): Json<CreateServiceBinding>,
) -> (StatusCode, Json<Value>) {
    let guid = Uuid::new_v4().to_string();
    let entity = json!({
        "app_guid": input.app_guid,
        "service_instance_guid": input.service_instance_guid,
        "syslog_drain_url": null
    });
    (StatusCode::CREATED, Json(v2_resource(&guid, entity)))
}

async fn list_processes(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let (page, per_page) = page_params(&params, "per_page");
    let processes = db.processes.read().await;
    let mut all: Vec<&Process> = processes.values().collect();
    all.sort_by(|a, b| a.guid.cmp(&b.guid));
    let all = all.into_iter().map(|p| json!(p)).collect();
    Json(v3_page(page, per_page, all))
}

async fn get_process(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let processes = db.processes.read().await;
    let process = processes
        .get(&id)
        .ok_or_else(|| not_found(&format!("The process could not be found: {id}")))?;
    Ok(Json(json!(process)))
}

#[derive(Deserialize)]
struct ScaleProcess {
    instances: Option<u32>,
    memory_in_mb: Option<u32>,
    disk_in_mb: Option<u32>,
}

async fn scale_process(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<ScaleProcess>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut processes = db.processes.write().await;
    let process = processes
        .get_mut(&id)
        .ok_or_else(|| not_found(&format!("The process could not be found: {id}")))?;
    if let Some(instances) = input.instances {
        process.instances = instances;
    }
    if let Some(memory) = input.memory_in_mb {
        process.memory_in_mb = memory;
    }
    if let Some(disk) = input.disk_in_mb {
        process.disk_in_mb = disk;
    }
    Ok(Json(json!(process)))
}

#[derive(Deserialize)]
struct UpdateProcess {
    #[allow(dead_code)]
    command: Option<String>,
}

async fn update_process(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(_input): Json<UpdateProcess>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let processes = db.processes.read().await;
    let process = processes
        .get(&id)
        .ok_or_else(|| not_found(&format!("The process could not be found: {id}")))?;
    Ok(Json(json!(process)))
}

async fn delete_process_instance(
    State(db): State<Db>,
    Path((id, _index)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    let processes = db.processes.read().await;
    if !processes.contains_key(&id) {
        return Err(not_found(&format!("The process could not be found: {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct CreateApp {
    name: String,
}

async fn create_app(State(db): State<Db>, Json(input): Json<CreateApp>) -> (StatusCode, Json<Value>) {
    let guid = Uuid::new_v4().to_string();
    let app = App {
        guid: guid.clone(),
        name: input.name,
        state: "STOPPED".to_string(),
    };
    db.apps.write().await.insert(guid, app.clone());
    (StatusCode::CREATED, Json(json!(app)))
}

async fn list_apps(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let (page, per_page) = page_params(&params, "per_page");
    let apps = db.apps.read().await;
    let mut all: Vec<&App> = apps.values().collect();
    all.sort_by(|a, b| a.name.cmp(&b.name));
    let all = all.into_iter().map(|a| json!(a)).collect();
    Json(v3_page(page, per_page, all))
}
