//! Shared Management API path definitions
//!
//! This crate centralizes all Management API paths to ensure consistency
//! between the settings controller and the mock server implementation.
//!
//! ## PathBuilder
//!
//! The `PathBuilder` provides a type-safe, builder-pattern API for constructing
//! API paths in different output formats (Axum routes or concrete HTTP paths).
//!
//! ## Route Constants
//!
//! Route constants are provided for Axum routes, which require static string literals.
//! These constants are validated against PathBuilder output in tests.

pub mod builder;
pub mod errors;
pub mod formats;
pub mod management;
pub mod operations;

// Re-export core types for convenience
pub use builder::PathBuilder;
pub use errors::PathBuilderError;
pub use formats::PathFormat;
pub use operations::{HttpMethod, ManagementOperation};
