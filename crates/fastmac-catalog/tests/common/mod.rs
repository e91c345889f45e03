//! Common test utilities for fastmac-catalog
//!
//! - Tool and catalog builders
//! - Catalog fixtures
//! - Ordering assertions

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
