//! # Drift Gate
//!
//! Decides per category whether a write is needed at all. Equality is deep
//! and ignores key order, so a category whose only changes are in ignored
//! fields is never written.

use crate::model::PartialDocument;

/// True iff `planned` is declared, non-empty and differs from `prior`
pub fn should_write(planned: Option<&PartialDocument>, prior: Option<&PartialDocument>) -> bool {
    match planned {
        Some(planned) if !planned.is_empty() => prior != Some(planned),
        _ => false,
    }
}
