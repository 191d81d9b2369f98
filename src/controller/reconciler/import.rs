//! # Import Copier
//!
//! First-contact discovery: build a partial document from everything the
//! remote reports as set. Omitted and explicit-null fields are left out so the
//! imported declaration stays minimal.

use crate::model::{FieldRegistry, Nullable, PartialDocument};

/// Copy every specified, non-null field of `full`
///
/// # Errors
///
/// Fails only if a remote field cannot be rendered as JSON.
pub fn copy<D: FieldRegistry>(full: &D) -> Result<PartialDocument, serde_json::Error> {
    let mut partial = PartialDocument::new();
    for field in D::fields() {
        if let Nullable::Value(value) = field.read(full)? {
            if !value.is_null() {
                partial.insert(field.name(), value);
            }
        }
    }
    Ok(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::categories::{ApiSettings, AuthSettings};
    use serde_json::{json, Value};

    #[test]
    fn test_copies_only_set_fields() {
        let full = ApiSettings {
            db_schema: Nullable::Value("public".to_owned()),
            max_rows: Nullable::Value(1000),
            db_pool: Nullable::Null,
            db_extra_search_path: Nullable::Unspecified,
        };
        let partial = copy(&full).unwrap();
        assert_eq!(
            Value::from(partial),
            json!({"db_schema": "public", "max_rows": 1000})
        );
    }

    #[test]
    fn test_uses_wire_names_in_registry_order() {
        let full = AuthSettings {
            jwt_exp: Nullable::Value(3600),
            site_url: Nullable::Value("http://localhost:3000".to_owned()),
            ..AuthSettings::default()
        };
        let partial = copy(&full).unwrap();
        let keys: Vec<&str> = partial.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["site_url", "jwt_exp"]);
    }

    #[test]
    fn test_empty_remote_imports_nothing() {
        assert!(copy(&AuthSettings::default()).unwrap().is_empty());
    }
}
