//! # fastmac-core
//!
//! Core library for FastMac providing:
//! - Catalog data types (raw document records and normalized tools)
//! - Configuration loading (fastmac.yaml, ~/.fastmac/config.yaml, FASTMAC_* overrides)
//! - JSON Schema validation for catalog files
//! - The error taxonomy shared by resolution and emission

pub mod config;
pub mod error;
pub mod schema;
pub mod shell;
pub mod types;
pub mod utils;

pub use config::{FastmacConfig, HierarchicalConfigLoader};
pub use error::{Error, ErrorKind, Result};
pub use schema::SchemaValidator;
pub use utils::get_home_dir;
