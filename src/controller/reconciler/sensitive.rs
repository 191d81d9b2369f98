//! # Sensitive Overlay
//!
//! Write-only fields come back empty from every read and write. After the
//! picker has run, their values are restored from the local declaration the
//! merge was based on.

use crate::model::{FieldRegistry, PartialDocument};

/// Restore `D`'s sensitive fields in `document` from `prior`
///
/// Fields `prior` does not declare are left alone.
pub fn overlay<D: FieldRegistry>(document: &mut PartialDocument, prior: &PartialDocument) {
    for name in D::sensitive_fields() {
        if let Some(value) = prior.get(name) {
            document.insert(*name, value.clone());
        }
    }
}
