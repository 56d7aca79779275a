//! Application ports

/// Provider registries
pub mod registry;

pub use registry::*;
