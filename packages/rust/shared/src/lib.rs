//! Shared types, error model, and configuration for Docshelf.
//!
//! This crate is the foundation depended on by all other Docshelf crates.
//! It provides:
//! - [`DocshelfError`] — the unified error type
//! - Domain types ([`Document`])
//! - Configuration ([`AppConfig`], [`LibraryConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, FetchConfig, LibraryConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use error::{DocshelfError, Result};
pub use types::Document;
