//! # Management API
//!
//! REST transport for the platform Management API.

mod client;

pub use client::ManagementApiClient;
