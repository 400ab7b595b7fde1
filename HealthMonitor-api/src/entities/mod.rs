// Public entities for the Health Monitor API
// This module contains data structures that are shared across the application boundary

// Response bodies for blood pressure endpoints
pub mod blood_pressure;

// Common entities for error handling
pub mod common;

// Query parameters
pub mod query;
