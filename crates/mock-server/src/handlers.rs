//! Request handlers
//!
//! Response shapes follow the Management API:
//!
//! - network restrictions are wrapped in `{"config": ...}` and applied with `201`
//! - pooler reads return one entry per database; writes echo the bare object
//! - storage writes answer without a body
//! - auth secrets never leave the server in clear text

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use paths::ManagementOperation;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::store::{MockState, SettingsKind};

/// Suffixes of auth fields the real API only stores hashed
const SECRET_SUFFIXES: [&str; 7] = [
    "_secret",
    "_secrets",
    "_pass",
    "_auth_token",
    "_access_key",
    "_api_key",
    "_api_secret",
];

pub fn is_secret_field(name: &str) -> bool {
    SECRET_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Replace secret values with a stable digest-like marker
fn redact(document: &Value) -> Value {
    match document {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        Value::String(secret) if is_secret_field(key) => {
                            Value::String(format!("hashed:{}", secret.len()))
                        }
                        other => other.clone(),
                    };
                    (key.clone(), value)
                })
                .collect::<Map<String, Value>>(),
        ),
        other => other.clone(),
    }
}

fn project_not_found(project_ref: &str) -> Response {
    warn!("  Project not found: {}", project_ref);
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("Project {project_ref} not found")})),
    )
        .into_response()
}

/// Reject requests without a bearer token
pub async fn require_bearer(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Bearer ") && value.len() > "Bearer ".len());
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        )
            .into_response();
    }
    next.run(request).await
}

pub async fn get_project(
    State(state): State<MockState>,
    Path(project_ref): Path<String>,
) -> Response {
    state.record(ManagementOperation::GetProject).await;
    match state.next_status(&project_ref).await {
        Some(status) => {
            info!("  GET project: {} -> {}", project_ref, status);
            Json(json!({"id": project_ref, "name": project_ref, "status": status})).into_response()
        }
        None => project_not_found(&project_ref),
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthQuery {
    #[serde(default)]
    services: String,
}

pub async fn get_services_health(
    State(state): State<MockState>,
    Path(project_ref): Path<String>,
    Query(query): Query<HealthQuery>,
) -> Response {
    state.record(ManagementOperation::GetServicesHealth).await;
    let services: Vec<&str> = query
        .services
        .split(',')
        .filter(|service| !service.is_empty())
        .collect();
    match state.next_health(&project_ref, &services).await {
        Some(records) => Json(records).into_response(),
        None => project_not_found(&project_ref),
    }
}

async fn read(
    state: &MockState,
    project_ref: &str,
    kind: SettingsKind,
    operation: ManagementOperation,
) -> Response {
    state.record(operation).await;
    let Some(document) = state.settings(project_ref, kind).await else {
        return project_not_found(project_ref);
    };
    info!("  GET {}: project={}", operation, project_ref);
    let body = match kind {
        SettingsKind::Auth => redact(&document),
        SettingsKind::Network => json!({
            "entitlement": "allowed",
            "config": document,
            "status": "applied",
        }),
        SettingsKind::Pooler => {
            let mut entry = json!({
                "identifier": project_ref,
                "database_type": "PRIMARY",
                "db_port": 6543,
            });
            crate::store::merge(&mut entry, document);
            json!([entry])
        }
        SettingsKind::Postgres | SettingsKind::Postgrest | SettingsKind::Storage => document,
    };
    Json(body).into_response()
}

async fn write(
    state: &MockState,
    project_ref: &str,
    kind: SettingsKind,
    operation: ManagementOperation,
    body: Value,
) -> Response {
    state.record(operation).await;
    if !body.is_object() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Request body must be a JSON object"})),
        )
            .into_response();
    }
    info!("  {} {}: project={}", operation.method(), operation, project_ref);

    if kind == SettingsKind::Network {
        if !state.has_project(project_ref).await {
            return project_not_found(project_ref);
        }
        state.set_settings(project_ref, kind, body.clone()).await;
        return (
            StatusCode::CREATED,
            Json(json!({"entitlement": "allowed", "config": body, "status": "stored"})),
        )
            .into_response();
    }

    let Some(document) = state.merge_settings(project_ref, kind, body).await else {
        return project_not_found(project_ref);
    };
    match kind {
        SettingsKind::Storage => StatusCode::OK.into_response(),
        SettingsKind::Auth => Json(redact(&document)).into_response(),
        _ => Json(document).into_response(),
    }
}

macro_rules! settings_handlers {
    ($($read:ident, $write:ident => $kind:expr, $read_op:expr, $write_op:expr;)+) => {
        $(
            pub async fn $read(
                State(state): State<MockState>,
                Path(project_ref): Path<String>,
            ) -> Response {
                read(&state, &project_ref, $kind, $read_op).await
            }

            pub async fn $write(
                State(state): State<MockState>,
                Path(project_ref): Path<String>,
                Json(body): Json<Value>,
            ) -> Response {
                write(&state, &project_ref, $kind, $write_op, body).await
            }
        )+
    };
}

settings_handlers! {
    get_postgres, update_postgres => SettingsKind::Postgres,
        ManagementOperation::GetPostgresConfig, ManagementOperation::UpdatePostgresConfig;
    get_network, apply_network => SettingsKind::Network,
        ManagementOperation::GetNetworkRestrictions, ManagementOperation::ApplyNetworkRestrictions;
    get_postgrest, update_postgrest => SettingsKind::Postgrest,
        ManagementOperation::GetPostgrestConfig, ManagementOperation::UpdatePostgrestConfig;
    get_auth, update_auth => SettingsKind::Auth,
        ManagementOperation::GetAuthConfig, ManagementOperation::UpdateAuthConfig;
    get_storage, update_storage => SettingsKind::Storage,
        ManagementOperation::GetStorageConfig, ManagementOperation::UpdateStorageConfig;
    get_pooler, update_pooler => SettingsKind::Pooler,
        ManagementOperation::GetPoolerConfig, ManagementOperation::UpdatePoolerConfig;
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}
