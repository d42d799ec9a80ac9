pub mod app;
pub mod config;
pub mod logging;
pub mod report;

pub use config::{AppConfig, CalcOverrides, ConfigError, OutputFormat};
