//! # Field Registries
//!
//! Every settings category declares its document through `settings_document!`,
//! which emits the typed struct together with a static table mapping each wire
//! field name to an accessor/mutator pair. Merge, import and write-body
//! construction walk that table instead of inspecting types at runtime.

use serde_json::Value;
use thiserror::Error;

use super::{Nullable, PartialDocument};

type ReadFn<D> = fn(&D) -> Result<Nullable<Value>, serde_json::Error>;
type WriteFn<D> = fn(&mut D, Value) -> Result<(), serde_json::Error>;

/// Accessor/mutator pair for one wire field of document `D`
pub struct FieldAccessor<D> {
    name: &'static str,
    read: ReadFn<D>,
    write: WriteFn<D>,
}

impl<D> FieldAccessor<D> {
    pub fn new(name: &'static str, read: ReadFn<D>, write: WriteFn<D>) -> Self {
        Self { name, read, write }
    }

    /// Wire name of the field
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read the field as JSON, keeping omitted and null apart
    pub fn read(&self, document: &D) -> Result<Nullable<Value>, serde_json::Error> {
        (self.read)(document)
    }

    /// Overwrite the field from a declared JSON value
    pub fn write(&self, document: &mut D, value: Value) -> Result<(), serde_json::Error> {
        (self.write)(document, value)
    }
}

impl<D> std::fmt::Debug for FieldAccessor<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A declared field could not be applied to a typed document
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("unknown field '{field}'")]
    Unknown { field: String },
    #[error("invalid value for field '{field}': {source}")]
    Invalid {
        field: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Static field table of a category document
pub trait FieldRegistry: Default + Sized + 'static {
    /// All fields in wire order
    fn fields() -> &'static [FieldAccessor<Self>];

    /// Write-only fields: accepted on write, never returned on read
    fn sensitive_fields() -> &'static [&'static str] {
        &[]
    }

    fn field(name: &str) -> Option<&'static FieldAccessor<Self>> {
        Self::fields().iter().find(|field| field.name() == name)
    }

    /// Build a typed document from a partial declaration
    ///
    /// Only declared fields are set; everything else stays `Unspecified` so it
    /// is left out of the request body.
    ///
    /// # Errors
    ///
    /// Rejects keys that are not fields of the document, and values that do
    /// not decode into the field's type.
    fn from_partial(partial: &PartialDocument) -> Result<Self, FieldError> {
        let mut document = Self::default();
        for (name, value) in partial {
            let field = Self::field(name).ok_or_else(|| FieldError::Unknown {
                field: name.clone(),
            })?;
            field
                .write(&mut document, value.clone())
                .map_err(|source| FieldError::Invalid {
                    field: name.clone(),
                    source,
                })?;
        }
        Ok(document)
    }
}

/// Declare a category document and its field registry
///
/// Each field is written as `rust_name as "wire_name": Type` and becomes a
/// `Nullable<Type>` that is skipped on serialization while unspecified. An
/// optional `sensitive = PATH` names a static list of write-only fields.
macro_rules! settings_document {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident $(sensitive = $sensitive:path)? {
            $(
                $(#[$field_meta:meta])*
                $field:ident as $wire:literal : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                #[serde(
                    rename = $wire,
                    default,
                    skip_serializing_if = "crate::model::Nullable::is_unspecified"
                )]
                pub $field: $crate::model::Nullable<$ty>,
            )*
        }

        impl $crate::model::FieldRegistry for $name {
            fn fields() -> &'static [$crate::model::FieldAccessor<Self>] {
                static FIELDS: ::std::sync::LazyLock<
                    ::std::vec::Vec<$crate::model::FieldAccessor<$name>>,
                > = ::std::sync::LazyLock::new(|| {
                    ::std::vec![
                        $(
                            $crate::model::FieldAccessor::new(
                                $wire,
                                |document| document.$field.to_json(),
                                |document, value| {
                                    document.$field = $crate::model::Nullable::from_json(value)?;
                                    Ok(())
                                },
                            ),
                        )*
                    ]
                });
                &FIELDS
            }

            $(
                fn sensitive_fields() -> &'static [&'static str] {
                    &$sensitive
                }
            )?
        }
    };
}

pub(crate) use settings_document;
