//! SSTV Core - Backend logic for SSTV Curator
//!
//! Fetches SatNOGS observations, downloads their decoded images and keeps
//! only the ones that contain picture content. This crate has no CLI
//! dependencies; the `sstv_app` binary wires it together.

pub mod classify;
pub mod config;
pub mod curator;
pub mod logging;
pub mod models;
pub mod network;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
