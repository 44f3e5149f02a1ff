//! Core module for common functionality across all targets

pub mod category;
pub mod export;
pub mod layout;
pub mod loader;
pub mod models;
pub mod policy;
pub mod resolver;
pub mod session;
pub mod view;

/// Returns the current version of the `CoursePlanner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
