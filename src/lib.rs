//! MCP tools for National Weather Service alerts and forecasts.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod lifecycle;
pub mod models;
pub mod service;

pub use config::WeatherConfig;
pub use lifecycle::Lifecycle;
pub use service::WeatherTools;
