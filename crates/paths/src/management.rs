//! # Management API Routes
//!
//! Static route templates for the Management API v1, in Axum 0.8 capture syntax.
//!
//! Settings categories share one route for read and write; the HTTP method
//! distinguishes the operation (see [`crate::ManagementOperation::method`]).

/// Placeholder substituted by [`crate::PathBuilder`] for HTTP paths
pub const PROJECT_REF_PLACEHOLDER: &str = "{project_ref}";

/// Project details, including lifecycle status
pub const PROJECT: &str = "/v1/projects/{project_ref}";
/// Batch health of project sub-services, filtered with `?services=`
pub const SERVICES_HEALTH: &str = "/v1/projects/{project_ref}/health";
/// Postgres runtime configuration
pub const POSTGRES_CONFIG: &str = "/v1/projects/{project_ref}/config/database/postgres";
/// Connection pooler configuration
pub const POOLER_CONFIG: &str = "/v1/projects/{project_ref}/config/database/pooler";
/// Database network restrictions (read)
pub const NETWORK_RESTRICTIONS: &str = "/v1/projects/{project_ref}/network-restrictions";
/// Database network restrictions (apply)
pub const NETWORK_RESTRICTIONS_APPLY: &str =
    "/v1/projects/{project_ref}/network-restrictions/apply";
/// Authentication service configuration
pub const AUTH_CONFIG: &str = "/v1/projects/{project_ref}/config/auth";
/// API gateway (PostgREST) configuration
pub const POSTGREST_CONFIG: &str = "/v1/projects/{project_ref}/postgrest";
/// Storage service configuration
pub const STORAGE_CONFIG: &str = "/v1/projects/{project_ref}/config/storage";
