//! Core types and services for usgs-water-mcp.
//!
//! This crate owns the endpoint catalog for the public USGS APIs, the
//! parameter validation and query-string construction for each tool, and the
//! HTTP client that issues the single upstream GET behind every tool call.

pub mod client;
pub mod control;
pub mod endpoints;
pub mod error;
pub mod query;
pub mod request;
pub mod validate;

pub use client::{BaseUrls, ClientConfig, Payload, UsgsClient};
pub use control::UsgsControlPlane;
pub use error::ToolError;
pub use url::Url;
