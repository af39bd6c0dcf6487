//! CLI command implementations.

pub mod common;
pub mod config;
pub mod devices;
pub mod kick;
pub mod notes;
pub mod play;
