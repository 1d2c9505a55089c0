//! CLI command implementations.

pub mod common;
pub mod params;
pub mod preview;
pub mod process;
pub mod render;
pub mod scenes;
