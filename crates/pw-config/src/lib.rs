//! Plot run configuration: TOML model, defaults, and validation.

pub mod config;
pub mod validate;

pub use config::{PlotConfig, CONFIG_FILE_NAME};
pub use validate::validate_config;
