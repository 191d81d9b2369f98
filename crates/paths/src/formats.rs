//! Output formats supported by the path builder.

/// How a path should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFormat {
    /// Concrete request path with the project reference substituted
    #[default]
    HttpPath,
    /// Axum route with a `{project_ref}` capture
    Route,
}
