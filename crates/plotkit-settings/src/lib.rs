//! PlotKit Settings Crate
//!
//! Loads, validates and saves the conversion settings used by the `plotkit`
//! binary, and turns them into converter options.

pub mod config;
pub mod error;

pub use config::{Config, ConversionSettings, TextSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
