//! Shared library for `CoursePlanner`
//! Contains the course graph, prerequisite policy evaluation, plan resolution,
//! and layout state used by the CLI and WASM targets

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub mod config;
pub mod core;
pub mod logger;

pub use core::get_version;
