//! # PathBuilder
//!
//! Builder-pattern API for rendering Management API paths.
//!
//! ```
//! use paths::{ManagementOperation, PathBuilder};
//!
//! let path = PathBuilder::new()
//!     .operation(ManagementOperation::GetAuthConfig)
//!     .project_ref("mayuaycdtijbctgqbycg")
//!     .build()
//!     .unwrap();
//! assert_eq!(path, "/v1/projects/mayuaycdtijbctgqbycg/config/auth");
//! ```

use crate::management::PROJECT_REF_PLACEHOLDER;
use crate::{ManagementOperation, PathBuilderError, PathFormat};

/// Builds paths for [`ManagementOperation`]s
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    operation: Option<ManagementOperation>,
    project_ref: Option<String>,
    format: PathFormat,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn operation(mut self, operation: ManagementOperation) -> Self {
        self.operation = Some(operation);
        self
    }

    #[must_use]
    pub fn project_ref(mut self, project_ref: impl Into<String>) -> Self {
        self.project_ref = Some(project_ref.into());
        self
    }

    #[must_use]
    pub fn format(mut self, format: PathFormat) -> Self {
        self.format = format;
        self
    }

    /// Render the path
    ///
    /// # Errors
    ///
    /// Fails when no operation was selected, or when an HTTP path is requested
    /// without a valid project reference.
    pub fn build(self) -> Result<String, PathBuilderError> {
        let operation = self.operation.ok_or(PathBuilderError::MissingOperation)?;
        let template = operation.template();

        match self.format {
            PathFormat::Route => Ok(template.to_owned()),
            PathFormat::HttpPath => {
                let project_ref = self
                    .project_ref
                    .ok_or(PathBuilderError::MissingProjectRef(operation.name()))?;
                if !is_valid_project_ref(&project_ref) {
                    return Err(PathBuilderError::InvalidProjectRef(project_ref));
                }
                Ok(template.replace(PROJECT_REF_PLACEHOLDER, &project_ref))
            }
        }
    }
}

/// Project references are used verbatim as a path segment
fn is_valid_project_ref(project_ref: &str) -> bool {
    !project_ref.is_empty()
        && project_ref
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{management, HttpMethod};

    #[test]
    fn test_http_path_substitutes_project_ref() {
        let path = PathBuilder::new()
            .operation(ManagementOperation::ApplyNetworkRestrictions)
            .project_ref("abc123")
            .build()
            .unwrap();
        assert_eq!(path, "/v1/projects/abc123/network-restrictions/apply");
    }

    #[test]
    fn test_route_format_matches_constants() {
        for operation in ManagementOperation::ALL {
            let route = PathBuilder::new()
                .operation(operation)
                .format(PathFormat::Route)
                .build()
                .unwrap();
            assert_eq!(route, operation.template(), "route mismatch for {operation}");
            assert!(route.starts_with("/v1/projects/{project_ref}"));
        }
        assert_eq!(
            ManagementOperation::GetAuthConfig.template(),
            management::AUTH_CONFIG
        );
    }

    #[test]
    fn test_read_and_write_share_routes() {
        assert_eq!(
            ManagementOperation::GetPostgresConfig.template(),
            ManagementOperation::UpdatePostgresConfig.template()
        );
        assert_eq!(ManagementOperation::UpdatePostgresConfig.method(), HttpMethod::Put);
        assert_eq!(ManagementOperation::UpdateAuthConfig.method(), HttpMethod::Patch);
        assert_eq!(
            ManagementOperation::ApplyNetworkRestrictions.method(),
            HttpMethod::Post
        );
    }

    #[test]
    fn test_missing_operation() {
        assert_eq!(
            PathBuilder::new().project_ref("abc").build(),
            Err(PathBuilderError::MissingOperation)
        );
    }

    #[test]
    fn test_invalid_project_ref_rejected() {
        let result = PathBuilder::new()
            .operation(ManagementOperation::GetProject)
            .project_ref("abc/../def")
            .build();
        assert_eq!(
            result,
            Err(PathBuilderError::InvalidProjectRef("abc/../def".to_owned()))
        );

        let missing = PathBuilder::new()
            .operation(ManagementOperation::GetProject)
            .build();
        assert_eq!(
            missing,
            Err(PathBuilderError::MissingProjectRef("get_project"))
        );
    }
}
