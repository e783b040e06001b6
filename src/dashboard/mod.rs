//! Terminal dashboard consuming the gateway's weather endpoint.

pub mod client;
pub mod format;
pub mod render;
pub mod types;
pub mod view;

pub use client::{DashboardError, GatewayClient};
pub use render::render;
pub use view::WeatherView;
