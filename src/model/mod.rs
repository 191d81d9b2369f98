//! # Data Model
//!
//! Types shared by the provider and the reconciler:
//!
//! - `ConfigCategory` - the independently read/written settings groups
//! - `Nullable` - three-state field values (omitted, null, set)
//! - `PartialDocument` - the operator-declared subset of a category
//! - `FieldRegistry` - static per-category field tables replacing runtime reflection
//! - project lifecycle and service health types

mod category;
mod document;
mod nullable;
mod registry;
mod status;

pub use category::ConfigCategory;
pub use document::PartialDocument;
pub use nullable::Nullable;
pub use registry::{FieldAccessor, FieldError, FieldRegistry};
pub(crate) use registry::settings_document;
pub use status::{
    HealthStatus, ProjectResponse, ProjectStatus, ServiceHealthRecord, ServiceName,
};
