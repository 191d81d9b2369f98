//! # Management API Client
//!
//! `reqwest` client implementing [`ManagementApi`].
//!
//! Every request carries a bearer token and a crate-specific `User-Agent`.
//! Paths come from the shared `paths` crate so the client and the mock server
//! cannot disagree on routes. Non-2xx statuses are returned as data, never as
//! errors.

use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use paths::{HttpMethod, ManagementOperation, PathBuilder};
use reqwest::Client as ReqwestClient;
use serde_json::Value;
use tracing::{debug, debug_span, Instrument};
use zeroize::Zeroizing;

use crate::config::ClientConfig;
use crate::model::{ConfigCategory, ServiceName};
use crate::provider::{read_operation, write_operation, ApiResponse, ManagementApi, ProviderError};

const USER_AGENT: &str = concat!("project-settings-controller/", env!("CARGO_PKG_VERSION"));

/// Management API REST client
pub struct ManagementApiClient {
    http_client: ReqwestClient,
    base_url: String,
    access_token: Zeroizing<String>,
}

impl std::fmt::Debug for ManagementApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagementApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ManagementApiClient {
    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Fails when the access token is empty or the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.access_token.trim().is_empty() {
            anyhow::bail!(
                "Management API access token is empty; set MANAGEMENT_ACCESS_TOKEN or SUPABASE_ACCESS_TOKEN"
            );
        }

        let http_client = ReqwestClient::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.api_url.trim_end_matches('/').to_owned(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        operation: ManagementOperation,
        project_ref: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, ProviderError> {
        let path = PathBuilder::new()
            .operation(operation)
            .project_ref(project_ref)
            .build()
            .map_err(|source| ProviderError::Path { operation, source })?;
        let url = format!("{}{}", self.base_url, path);

        let span = debug_span!(
            "management.request",
            operation = operation.name(),
            method = operation.method().as_str(),
            project_ref = project_ref
        );

        async move {
            let start = Instant::now();
            let mut request = match operation.method() {
                HttpMethod::Get => self.http_client.get(&url),
                HttpMethod::Post => self.http_client.post(&url),
                HttpMethod::Put => self.http_client.put(&url),
                HttpMethod::Patch => self.http_client.patch(&url),
            }
            .bearer_auth(self.access_token.as_str());

            if !query.is_empty() {
                request = request.query(query);
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .map_err(|e| ProviderError::request(operation, e))?;
            let status = response.status().as_u16();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ProviderError::request(operation, e))?;

            debug!(
                status,
                duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                "Management API responded"
            );
            Ok(ApiResponse::new(status, bytes.to_vec()))
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl ManagementApi for ManagementApiClient {
    async fn read_settings(
        &self,
        project_ref: &str,
        category: ConfigCategory,
    ) -> Result<ApiResponse, ProviderError> {
        self.send(read_operation(category), project_ref, None, &[])
            .await
    }

    async fn write_settings(
        &self,
        project_ref: &str,
        category: ConfigCategory,
        body: &Value,
    ) -> Result<ApiResponse, ProviderError> {
        let response = self
            .send(write_operation(category), project_ref, Some(body), &[])
            .await?;

        // Storage PATCH answers without a document; read it back instead
        if category == ConfigCategory::Storage && response.is_success() {
            return self.read_settings(project_ref, category).await;
        }
        Ok(response)
    }

    async fn project_status(&self, project_ref: &str) -> Result<ApiResponse, ProviderError> {
        self.send(ManagementOperation::GetProject, project_ref, None, &[])
            .await
    }

    async fn services_health(
        &self,
        project_ref: &str,
        services: &[ServiceName],
    ) -> Result<ApiResponse, ProviderError> {
        let services = services
            .iter()
            .map(|service| service.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.send(
            ManagementOperation::GetServicesHealth,
            project_ref,
            None,
            &[("services", services)],
        )
        .await
    }
}
