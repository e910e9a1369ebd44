//! Shared library surface for the analysis server and its tests.

pub mod api;
pub mod config;
pub mod state;
