//! Type definitions for the FastMac catalog and configuration

mod catalog_types;
mod config_types;
mod tool_types;

pub use catalog_types::*;
pub use config_types::*;
pub use tool_types::*;
