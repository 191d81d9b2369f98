//! # Runtime Module
//!
//! Process-wide setup shared by every embedder of the controller.

pub mod initialization;

pub use initialization::*;
