//! Lumina Weather: a caching gateway in front of the Visual Crossing
//! timeline API, plus a terminal dashboard that consumes it.

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod forecast;
pub mod routes;
