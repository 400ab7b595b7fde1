pub mod blood_pressure;
pub mod health;
pub mod metadata;
pub mod sleep;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::health_check;
pub use metadata::{get_metadata, root};
