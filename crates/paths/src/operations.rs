//! # Management API Operations
//!
//! Every remote call the settings controller issues, with its HTTP method and
//! route template.

use crate::management;

/// HTTP verbs used by the Management API
///
/// Kept independent of any HTTP crate so the mock server and the client can
/// map it onto their own types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Management API operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagementOperation {
    GetProject,
    GetServicesHealth,
    GetPostgresConfig,
    UpdatePostgresConfig,
    GetPoolerConfig,
    UpdatePoolerConfig,
    GetNetworkRestrictions,
    ApplyNetworkRestrictions,
    GetAuthConfig,
    UpdateAuthConfig,
    GetPostgrestConfig,
    UpdatePostgrestConfig,
    GetStorageConfig,
    UpdateStorageConfig,
}

impl ManagementOperation {
    /// All operations, used by tests to validate route constants
    pub const ALL: [ManagementOperation; 14] = [
        ManagementOperation::GetProject,
        ManagementOperation::GetServicesHealth,
        ManagementOperation::GetPostgresConfig,
        ManagementOperation::UpdatePostgresConfig,
        ManagementOperation::GetPoolerConfig,
        ManagementOperation::UpdatePoolerConfig,
        ManagementOperation::GetNetworkRestrictions,
        ManagementOperation::ApplyNetworkRestrictions,
        ManagementOperation::GetAuthConfig,
        ManagementOperation::UpdateAuthConfig,
        ManagementOperation::GetPostgrestConfig,
        ManagementOperation::UpdatePostgrestConfig,
        ManagementOperation::GetStorageConfig,
        ManagementOperation::UpdateStorageConfig,
    ];

    /// Operation name as used in logs and error messages
    pub fn name(self) -> &'static str {
        match self {
            ManagementOperation::GetProject => "get_project",
            ManagementOperation::GetServicesHealth => "get_services_health",
            ManagementOperation::GetPostgresConfig => "get_postgres_config",
            ManagementOperation::UpdatePostgresConfig => "update_postgres_config",
            ManagementOperation::GetPoolerConfig => "get_pooler_config",
            ManagementOperation::UpdatePoolerConfig => "update_pooler_config",
            ManagementOperation::GetNetworkRestrictions => "get_network_restrictions",
            ManagementOperation::ApplyNetworkRestrictions => "apply_network_restrictions",
            ManagementOperation::GetAuthConfig => "get_auth_config",
            ManagementOperation::UpdateAuthConfig => "update_auth_config",
            ManagementOperation::GetPostgrestConfig => "get_postgrest_config",
            ManagementOperation::UpdatePostgrestConfig => "update_postgrest_config",
            ManagementOperation::GetStorageConfig => "get_storage_config",
            ManagementOperation::UpdateStorageConfig => "update_storage_config",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            ManagementOperation::GetProject
            | ManagementOperation::GetServicesHealth
            | ManagementOperation::GetPostgresConfig
            | ManagementOperation::GetPoolerConfig
            | ManagementOperation::GetNetworkRestrictions
            | ManagementOperation::GetAuthConfig
            | ManagementOperation::GetPostgrestConfig
            | ManagementOperation::GetStorageConfig => HttpMethod::Get,
            ManagementOperation::UpdatePostgresConfig => HttpMethod::Put,
            ManagementOperation::ApplyNetworkRestrictions => HttpMethod::Post,
            ManagementOperation::UpdatePoolerConfig
            | ManagementOperation::UpdateAuthConfig
            | ManagementOperation::UpdatePostgrestConfig
            | ManagementOperation::UpdateStorageConfig => HttpMethod::Patch,
        }
    }

    /// Route template containing the `{project_ref}` capture
    pub fn template(self) -> &'static str {
        match self {
            ManagementOperation::GetProject => management::PROJECT,
            ManagementOperation::GetServicesHealth => management::SERVICES_HEALTH,
            ManagementOperation::GetPostgresConfig | ManagementOperation::UpdatePostgresConfig => {
                management::POSTGRES_CONFIG
            }
            ManagementOperation::GetPoolerConfig | ManagementOperation::UpdatePoolerConfig => {
                management::POOLER_CONFIG
            }
            ManagementOperation::GetNetworkRestrictions => management::NETWORK_RESTRICTIONS,
            ManagementOperation::ApplyNetworkRestrictions => management::NETWORK_RESTRICTIONS_APPLY,
            ManagementOperation::GetAuthConfig | ManagementOperation::UpdateAuthConfig => {
                management::AUTH_CONFIG
            }
            ManagementOperation::GetPostgrestConfig
            | ManagementOperation::UpdatePostgrestConfig => management::POSTGREST_CONFIG,
            ManagementOperation::GetStorageConfig | ManagementOperation::UpdateStorageConfig => {
                management::STORAGE_CONFIG
            }
        }
    }
}

impl std::fmt::Display for ManagementOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
