//! Process-level runtime concerns shared by the binaries: environment
//! configuration and logging setup.

pub mod config;
pub mod logging;

pub use config::{ClientConfig, ConfigError, ServerConfig};
