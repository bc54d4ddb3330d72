//! MCP tool modules.
//!
//! Tools are grouped by upstream API: NWIS water data, flood impact reference
//! points, and the OGC monitoring-location catalog, plus contextual help.

pub mod flood_impact;
pub mod ogc;
pub mod water_data;
mod context;
