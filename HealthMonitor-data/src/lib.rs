// Health Monitor Data
// This crate owns the storage boundary: typed document models and the
// read-only sources that load them from flat JSON files.

// Storage models
pub mod models;

// Series sources for data access
pub mod repository;

// Synthetic documents for demos and tests
pub mod fixtures;
