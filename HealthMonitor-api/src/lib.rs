// health_monitor_api lib.rs
//
// This is the main library file for the Health Monitor API.
// It re-exports the APIs from the various modules.

// Public modules
pub mod api;
pub mod chart;
pub mod config;
pub mod entities;
pub mod openapi;
