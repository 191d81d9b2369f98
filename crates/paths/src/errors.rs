//! Errors raised while building API paths.

use thiserror::Error;

/// Error returned by [`crate::PathBuilder::build`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathBuilderError {
    /// No operation was selected before building
    #[error("no operation selected")]
    MissingOperation,
    /// HTTP paths need a concrete project reference
    #[error("operation {0} requires a project reference")]
    MissingProjectRef(&'static str),
    /// Project references are single path segments
    #[error("invalid project reference '{0}': must be non-empty and contain only [A-Za-z0-9_-]")]
    InvalidProjectRef(String),
}
