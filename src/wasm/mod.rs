//! WASM library entry point for `CoursePlanner`
//! This module exports the planning session to JavaScript/TypeScript

mod planner;

pub use planner::{get_wasm_version, WasmPlanner};
