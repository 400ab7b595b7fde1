// Health Monitor Domain
// This crate contains the business logic for the health monitoring API

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
