//! Shared error model and configuration for mdpress.
//!
//! This crate is the foundation depended on by the other mdpress crates.
//! It provides:
//! - [`MdpressError`] — the unified error type
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, TemplateConfig, config_dir, config_file_path, load_config,
    load_config_from,
};
pub use error::{MdpressError, Result};
